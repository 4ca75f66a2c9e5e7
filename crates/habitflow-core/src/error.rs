//! Core error types for habitflow-core.
//!
//! This module defines the error hierarchy using thiserror. The domain
//! layer never panics under normal operation: recoverable conditions are
//! absorbed where they occur and everything else propagates as a typed
//! error.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for habitflow-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Persistent-store errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

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

/// Errors from the JSON file stores.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to resolve or create the data directory
    #[error("Failed to prepare data directory {path}: {source}")]
    DataDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a collection to disk
    #[error("Failed to write {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize a collection
    #[error("Failed to encode {path}: {source}")]
    EncodeFailed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
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

/// Validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// A required name was empty after trimming
    #[error("Empty name for {0}")]
    EmptyName(&'static str),

    /// Goal target date precedes its creation date
    #[error("Target date {target} is before creation date {created}")]
    TargetBeforeCreation {
        target: chrono::NaiveDate,
        created: chrono::NaiveDate,
    },

    /// Not enough momentum points for a freeze
    #[error("Insufficient momentum points: have {have}, need {need}")]
    InsufficientPoints { have: u32, need: u32 },

    /// Referenced record does not exist
    #[error("Unknown {kind} id: {id}")]
    UnknownId { kind: &'static str, id: String },

    /// Malformed reminder time string
    #[error("Invalid reminder time '{0}', expected HH:MM")]
    InvalidReminderTime(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
