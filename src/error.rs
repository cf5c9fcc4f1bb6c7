//! Error types for timesift

use thiserror::Error;

/// Result type alias for timesift operations
pub type Result<T> = std::result::Result<T, TimesiftError>;

/// Timesift error types
#[derive(Error, Debug)]
pub enum TimesiftError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown event type: {0}")]
    UnknownEventType(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
