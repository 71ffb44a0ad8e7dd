//! Error types for pending-item stores.

use thiserror::Error;

/// Pending-item store error type.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The submitted entry is blank.
    #[error("url must not be empty")]
    EmptyUrl,
    /// The submitted entry cannot be stored as a single item.
    #[error("invalid url entry: {0}")]
    InvalidEntry(String),
    /// Local file error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// HTTP client error.
    #[error("http client error: {0}")]
    Http(#[from] reqwest::Error),
    /// Remote store answered with a non-success status.
    #[error("remote store error {status}: {body}")]
    Remote {
        /// HTTP status code.
        status: u16,
        /// Response body.
        body: String,
    },
    /// Remote payload did not have the expected shape.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    /// Missing or invalid store settings.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Convenience result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
