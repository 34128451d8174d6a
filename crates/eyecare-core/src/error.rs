//! Core error types for eyecare-core.
//!
//! Defines the error hierarchy using thiserror. Storage read paths
//! deliberately degrade instead of erroring (missing or malformed history
//! reads as empty); write paths and the advisor call boundary use these
//! types.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for eyecare-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Advice-service errors
    #[error("Advisor error: {0}")]
    Advisor(#[from] AdvisorError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Storage-specific errors.
#[derive(Error, Debug)]
pub enum StorageError {
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

    /// Migration failed
    #[error("Database migration failed: {0}")]
    MigrationFailed(String),

    /// Stored value could not be serialized
    #[error("Serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
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

/// Advice-service errors. These never cross the `Advisor::ask` boundary;
/// callers always receive the fallback string instead.
#[derive(Error, Debug)]
pub enum AdvisorError {
    /// No API key in the keyring or environment
    #[error("No Gemini API key configured")]
    MissingApiKey,

    /// HTTP transport failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success status from the API
    #[error("Gemini API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// Response contained no usable text
    #[error("Gemini API returned no text")]
    EmptyResponse,
}
