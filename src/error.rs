//! Error types for kbsearch.
//!
//! The ranking core (`analysis` and `search`) never fails: degenerate input
//! yields an empty result list. Everything around it (configuration files,
//! the document store, the usage log, ingestion and the CLI) reports failures
//! through [`KbSearchError`].
//!
//! # Examples
//!
//! ```
//! use kbsearch::error::{KbSearchError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(KbSearchError::invalid_argument("Invalid input"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for kbsearch operations.
#[derive(Error, Debug)]
pub enum KbSearchError {
    /// I/O errors (file operations, directories, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid or unreadable search configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Document store errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// A referenced record does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid argument supplied by a caller
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Input the crate does not know how to handle (e.g. an upload format)
    #[error("Unsupported: {0}")]
    Unsupported(String),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with KbSearchError.
pub type Result<T> = std::result::Result<T, KbSearchError>;

impl KbSearchError {
    /// Create a new configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        KbSearchError::Config(msg.into())
    }

    /// Create a new storage error.
    pub fn storage<S: Into<String>>(msg: S) -> Self {
        KbSearchError::Storage(msg.into())
    }

    /// Create a new not found error.
    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        KbSearchError::NotFound(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        KbSearchError::InvalidArgument(msg.into())
    }

    /// Create a new unsupported input error.
    pub fn unsupported<S: Into<String>>(msg: S) -> Self {
        KbSearchError::Unsupported(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        KbSearchError::Other(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = KbSearchError::storage("disk full");
        assert_eq!(error.to_string(), "Storage error: disk full");

        let error = KbSearchError::not_found("Document not found");
        assert_eq!(error.to_string(), "Not found: Document not found");

        let error = KbSearchError::config("maxResults must be positive");
        assert_eq!(
            error.to_string(),
            "Configuration error: maxResults must be positive"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error = KbSearchError::from(io_error);

        match error {
            KbSearchError::Io(_) => {}
            _ => panic!("Expected IO error variant"),
        }
    }

    #[test]
    fn test_json_error_conversion() {
        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error = KbSearchError::from(json_error);
        assert!(matches!(error, KbSearchError::Json(_)));
    }
}
