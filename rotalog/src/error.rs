//! # Error Types
//!
//! Centralized error definitions for the rotalog crate.
//! All errors implement `std::error::Error` and `std::fmt::Display`.

use thiserror::Error;

/// Unified error type for logger operations.
///
/// Every write method returns this synchronously. Nothing is retried and a
/// failure on one sink never rolls back a write that already reached another.
#[derive(Error, Debug)]
pub enum LoggerError {
    #[error(transparent)]
    Config(ConfigError),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Console write failed: {0}")]
    Console(#[source] std::io::Error),

    #[error("Failed to serialize payload: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Log file is closed: {path}")]
    Closed { path: String },
}

impl From<ConfigError> for LoggerError {
    fn from(e: ConfigError) -> Self {
        LoggerError::Config(e)
    }
}

impl LoggerError {
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        LoggerError::Io {
            path: path.display().to_string(),
            source,
        }
    }
}

/// Configuration-related errors
#[derive(Error, Debug, Clone)]
pub enum ConfigError {
    #[error("Missing required configuration field: '{field}'")]
    MissingField { field: String },

    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Failed to load configuration from {path}: {msg}")]
    Load { path: String, msg: String },
}

impl ConfigError {
    pub(crate) fn invalid(field: &str, reason: impl Into<String>) -> Self {
        ConfigError::InvalidValue {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}
