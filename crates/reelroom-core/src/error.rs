//! Error types for reelroom.

use thiserror::Error;

/// Result type alias using reelroom's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for reelroom operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation failed (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Tenant identification failed (missing/unusable Authorization header)
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Blob-store URL signing failed
    #[error("Signing error: {0}")]
    Signing(String),

    /// Ingestion queue enqueue failed
    #[error("Queue error: {0}")]
    Queue(String),

    /// Inference collaborator call failed (transport, status, or payload)
    #[error("Inference error: {0}")]
    Inference(String),

    /// Chat turn could not be completed; the single user-facing error class
    /// for a failed generation. The user's own turn is never rolled back.
    #[error("cannot generate response")]
    Generation,

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// File I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
