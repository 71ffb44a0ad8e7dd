//! Error types for text-generation backends.

use thiserror::Error;

/// Errors produced while calling a text-generation backend.
#[derive(Debug, Error)]
pub enum LlmError {
    /// HTTP request failed.
    #[error("http client error: {0}")]
    Http(#[from] reqwest::Error),
    /// The provider answered with a non-success status.
    #[error("api error {status}: {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body, as returned.
        body: String,
    },
    /// The response did not contain generated text.
    #[error("failed to parse response: {0}")]
    Parse(String),
    /// The prompt template has no `{text}` slot.
    #[error("prompt template must contain exactly one {{text}} slot, found {0}")]
    InvalidTemplate(usize),
    /// Provider is missing a required setting.
    #[error("provider not configured: {0}")]
    NotConfigured(String),
}
