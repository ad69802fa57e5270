//! Core error types for daka-core.
//!
//! The domain operations (calendar math, check-in toggling, registry edits)
//! never fail. Errors only come from the edges: reading and writing blobs,
//! the configuration file, and parsing user-supplied day keys.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for daka-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Day key parsing errors
    #[error("Invalid day key: {0}")]
    Key(#[from] KeyError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Blob store errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Writing a blob failed
    #[error("Failed to write '{key}' to {path}: {source}")]
    WriteFailed {
        key: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Encoding a value before writing failed
    #[error("Failed to encode '{key}': {source}")]
    EncodeFailed {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// The data directory could not be resolved or created
    #[error("Data directory unavailable: {0}")]
    DataDir(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),
}

/// Errors produced when parsing a `YYYY-MM-DD` day key.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeyError {
    /// Not in `YYYY-MM-DD` shape
    #[error("'{0}' is not in YYYY-MM-DD form")]
    Malformed(String),

    /// Well-formed but not a real calendar day
    #[error("'{0}' is not a valid calendar date")]
    InvalidDate(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
