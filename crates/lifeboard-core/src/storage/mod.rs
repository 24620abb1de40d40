mod config;
pub mod database;
pub mod kv;

pub use config::{AiConfig, CoachConfig, Config};
pub use database::{Database, SessionRecord};
pub use kv::{KvStore, MemoryKv};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns the data directory, creating it if needed.
///
/// `LIFEBOARD_HOME` wins when set. Otherwise `~/.config/lifeboard[-dev]/`,
/// with `LIFEBOARD_ENV=dev` selecting the development directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("LIFEBOARD_HOME") {
        Some(home) if !home.is_empty() => PathBuf::from(home),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("LIFEBOARD_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("lifeboard-dev")
            } else {
                base_dir.join("lifeboard")
            }
        }
    };

    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::DataDir {
        path: dir.clone(),
        message: e.to_string(),
    })?;
    Ok(dir)
}
