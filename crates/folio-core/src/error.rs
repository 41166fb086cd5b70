//! Error types for the folio backfill pipeline.

use thiserror::Error;

/// Result type alias using folio's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for folio operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation failed (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Book not found
    #[error("Book not found: {0}")]
    BookNotFound(i64),

    /// Catalog lookup call failed (transport, timeout, non-2xx)
    #[error("Lookup error: {0}")]
    Lookup(String),

    /// Malformed or unexpected response shape
    #[error("Parse error: {0}")]
    Parse(String),

    /// Image download failed (transport, timeout, non-2xx)
    #[error("Download error: {0}")]
    Download(String),

    /// Object store write failed
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// File I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Parse(e.to_string())
    }
}

/// Bare reqwest failures default to the lookup variant; the download and
/// storage paths wrap their errors explicitly to keep the taxonomy distinct.
impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Lookup(e.to_string())
    }
}
