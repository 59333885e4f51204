//! Error types for the finassist plugin.
//!
//! This module defines the centralized error type [`FinAssistError`] and a type
//! alias [`Result`] used throughout the crate. Errors here are internal: none of
//! them reach the screen directly. Request failures shown to the user are
//! normalized into [`RequestOutcome::Failure`](crate::domain::RequestOutcome)
//! instead.

use thiserror::Error;

/// The main error type for finassist operations.
///
/// # Examples
///
/// ```
/// use finassist::domain::FinAssistError;
///
/// let err = FinAssistError::Theme("missing [colors] table".to_string());
/// assert_eq!(err.to_string(), "Theme error: missing [colors] table");
/// ```
#[derive(Debug, Error)]
pub enum FinAssistError {
    /// Filesystem or I/O operation failed.
    ///
    /// Wraps errors from reading the selected document or writing the trace
    /// file. Automatically converts from `std::io::Error`.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme parsing or loading failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Communication with the document worker failed.
    ///
    /// Occurs when a worker message or response cannot be (de)serialized.
    #[error("Worker communication error: {0}")]
    Worker(String),
}

impl From<serde_json::Error> for FinAssistError {
    fn from(e: serde_json::Error) -> Self {
        Self::Worker(e.to_string())
    }
}

/// A specialized `Result` type for finassist operations.
pub type Result<T> = std::result::Result<T, FinAssistError>;
