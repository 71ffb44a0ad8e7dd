//! Error types for digest delivery.

use thiserror::Error;

/// Errors raised while delivering a digest.
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// Invalid mailbox or relay settings.
    #[error("Configuration error: {0}")]
    Config(String),
    /// Message could not be built.
    #[error("message error: {0}")]
    Message(String),
    /// SMTP relay rejected or failed the send.
    #[error("SMTP error: {0}")]
    Smtp(String),
    /// Archive file could not be written.
    #[error("archive io error: {0}")]
    Io(#[from] std::io::Error),
}
