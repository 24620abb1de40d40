//! Core error types for lifeboard-core.
//!
//! Local store operations are infallible apart from persistence; AI gateway
//! failures are caught at the gateway boundary and never reach callers as
//! errors, but the transport layer still reports them through [`GatewayError`].

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for lifeboard-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Database-related errors
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Text-generation service errors
    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Database-specific errors.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to open database connection
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Database is locked
    #[error("Database is locked")]
    Locked,
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Data directory could not be resolved or created
    #[error("Cannot prepare data directory {path}: {message}")]
    DataDir { path: PathBuf, message: String },

    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Unknown dot-path key
    #[error("unknown config key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Errors raised by a [`crate::gateway::TextGenerator`] implementation.
#[derive(Error, Debug)]
pub enum GatewayError {
    /// No API key configured
    #[error("API key missing")]
    MissingCredential,

    /// Transport failure (DNS, TLS, timeout, ...)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success status from the service
    #[error("service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// Response carried no text candidate
    #[error("response contained no text")]
    EmptyResponse,

    /// Structured output could not be decoded
    #[error("malformed structured response: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Referenced entity does not exist
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

impl From<rusqlite::Error> for DatabaseError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(inner, _msg) => {
                if inner.code == rusqlite::ErrorCode::DatabaseBusy
                    || inner.code == rusqlite::ErrorCode::DatabaseLocked
                {
                    DatabaseError::Locked
                } else {
                    DatabaseError::QueryFailed(err.to_string())
                }
            }
            _ => DatabaseError::QueryFailed(err.to_string()),
        }
    }
}

impl From<rusqlite::Error> for CoreError {
    fn from(err: rusqlite::Error) -> Self {
        CoreError::Database(err.into())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
