//! Core error types for flowmind-core.
//!
//! The analysis engine itself never fails: every scoring and classification
//! function is total and falls back to neutral defaults. Errors only arise at
//! the storage boundary (config file, snapshot file) and are modelled here
//! using thiserror.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for flowmind-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Snapshot file could not be read or written
    #[error("Snapshot error at {path}: {message}")]
    Snapshot { path: PathBuf, message: String },

    /// Validation errors for caller-supplied input (CLI arguments, ids)
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML deserialization errors
    #[error("TOML parse error: {0}")]
    TomlDe(#[from] toml::de::Error),

    /// TOML serialization errors
    #[error("TOML write error: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The data directory could not be resolved or created
    #[error("Cannot prepare data directory {path}: {message}")]
    DataDir { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),
}

/// Validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Empty task text
    #[error("Task text must not be empty")]
    EmptyText,

    /// No task with the given id
    #[error("No task with id '{0}'")]
    UnknownTask(String),

    /// An operation needs an active workflow
    #[error("No active workflow")]
    NoActiveWorkflow,
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
