//! Error types for content loading.

use thiserror::Error;

/// Errors that can occur while loading a document.
#[derive(Debug, Error)]
pub enum ScrapingError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// HTTP client configuration error.
    #[error("HTTP client error: {0}")]
    HttpClient(String),

    /// The server answered with a non-success status.
    #[error("HTTP status {0}")]
    HttpStatus(u16),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The input is neither a URL nor a video identifier.
    #[error("Unrecognized source: {0}")]
    UnrecognizedSource(String),

    /// Content extraction failed.
    #[error("Content extraction failed: {0}")]
    ExtractionFailed(String),

    /// Content type not supported.
    #[error("Unsupported content type: {0}")]
    UnsupportedContentType(String),

    /// The video has no caption track to read.
    #[error("No transcript available for video {0}")]
    NoTranscript(String),

    /// Local file error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// PDF text extraction failed.
    #[error("PDF extraction failed: {0}")]
    Pdf(String),

    /// Regex error.
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),
}
