//! Error types for splitmark
//!
//! This module provides error handling for configuration loading and the
//! document-facing surfaces. The split engine itself is a total function
//! over well-formed input and has no failure modes of its own.

use thiserror::Error;

/// Main error type for splitmark operations
#[derive(Error, Debug)]
pub enum SplitmarkError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for splitmark operations
pub type Result<T> = std::result::Result<T, SplitmarkError>;

impl From<regex::Error> for SplitmarkError {
    fn from(err: regex::Error) -> Self {
        SplitmarkError::Config(format!("invalid heading pattern: {}", err))
    }
}
