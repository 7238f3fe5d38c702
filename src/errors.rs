//! Error types for textbook-qa
//!
//! Library operations return [`QaError`]. The session converts every error
//! raised while answering into a user-facing notice, so these rarely reach
//! the binary.

use thiserror::Error;

/// Main error type for the question-answering system
#[derive(Error, Debug)]
pub enum QaError {
    /// Session state machine transition errors
    #[error("Invalid state transition from {from} on {event}")]
    InvalidTransition { from: String, event: String },

    /// A question was submitted before any textbook content was loaded
    #[error("No textbook content loaded")]
    EmptyCorpus,

    /// Retrieval or synthesis failed unexpectedly
    #[error("Processing fault: {0}")]
    ProcessingFault(String),

    /// A question was submitted while another is still being processed
    #[error("A question is already being processed")]
    Busy,

    /// Submitted content was blank or otherwise unusable
    #[error("Invalid content: {0}")]
    InvalidContent(String),

    /// Ingestion was asked to read a file that is not plain text
    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Generic errors with context
    #[error("{0}")]
    Generic(String),
}

/// Result type alias for question-answering operations
pub type Result<T> = std::result::Result<T, QaError>;

/// Convert anyhow errors to QaError
impl From<anyhow::Error> for QaError {
    fn from(err: anyhow::Error) -> Self {
        QaError::Generic(err.to_string())
    }
}
