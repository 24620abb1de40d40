//! TOML-based application configuration.
//!
//! Stores:
//! - AI service settings (credential, endpoint, models, timeout)
//! - Coach settings (welcome message)
//!
//! Configuration is stored at `<data_dir>/config.toml`. The API key may also
//! come from the `GEMINI_API_KEY` or `API_KEY` environment variables, which
//! take precedence over the file.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::data_dir;
use crate::error::{ConfigError, Result};

const CONFIG_FILE: &str = "config.toml";
const API_KEY_ENV_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

/// Text-generation service configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiConfig {
    /// Empty means "not configured".
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_chat_model")]
    pub chat_model: String,
    #[serde(default = "default_breakdown_model")]
    pub breakdown_model: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Coach configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoachConfig {
    #[serde(default = "default_welcome_message")]
    pub welcome_message: String,
}

/// Application configuration.
///
/// Serialized to/from TOML at `<data_dir>/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub ai: AiConfig,
    #[serde(default)]
    pub coach: CoachConfig,
}

// Default functions
fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com".into()
}
fn default_chat_model() -> String {
    "gemini-3-flash-preview".into()
}
fn default_breakdown_model() -> String {
    "gemini-3-pro-preview".into()
}
fn default_timeout_secs() -> u64 {
    30
}
fn default_welcome_message() -> String {
    "Hello! I'm your productivity coach. How are you feeling about your goals today?".into()
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_base_url(),
            chat_model: default_chat_model(),
            breakdown_model: default_breakdown_model(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for CoachConfig {
    fn default() -> Self {
        Self {
            welcome_message: default_welcome_message(),
        }
    }
}

impl AiConfig {
    /// The credential to use, environment first. `None` when unset or blank.
    pub fn resolved_api_key(&self) -> Option<String> {
        let from_env = API_KEY_ENV_VARS
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .find(|v| !v.trim().is_empty());
        from_env.or_else(|| {
            let key = self.api_key.trim();
            (!key.is_empty()).then(|| key.to_string())
        })
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_none() {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value.parse::<bool>().map_err(|e| invalid(e.to_string()))?,
                    ),
                    serde_json::Value::Number(_) => value
                        .parse::<u64>()
                        .map(|n| serde_json::Value::Number(n.into()))
                        .map_err(|_| invalid(format!("cannot parse '{value}' as number")))?,
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        return Err(invalid("cannot replace a whole section".into()));
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    pub fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join(CONFIG_FILE))
    }

    /// Load from disk, writing the defaults on first run.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => toml::from_str(&content).map_err(|e| {
                ConfigError::LoadFailed {
                    path,
                    message: e.to_string(),
                }
                .into()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save()?;
                Ok(cfg)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path,
                message: e.to_string(),
            }
            .into()),
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<()> {
        let path = Self::path()?;
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.clone(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(&path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by key without saving.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value cannot be parsed.
    pub fn apply(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json)?;
        Ok(())
    }

    /// Set a config value by key and persist.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.apply(key, value)?;
        self.save()
    }

    /// Copy with the API key masked, for display.
    pub fn redacted(&self) -> Self {
        let mut cfg = self.clone();
        if !cfg.ai.api_key.is_empty() {
            cfg.ai.api_key = "********".into();
        }
        cfg
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "falling back to default configuration");
            Self::default()
        })
    }
}
