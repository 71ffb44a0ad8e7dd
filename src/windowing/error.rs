//! Error types for window splitting and summary stitching.

use thiserror::Error;

/// Errors raised by the windowing helpers.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WindowError {
    /// Window sizing that cannot make forward progress.
    #[error(
        "invalid window configuration: window_size={window_size}, overlap_size={overlap_size} (need window_size > overlap_size)"
    )]
    InvalidWindowConfig {
        /// Requested window length in tokens.
        window_size: usize,
        /// Requested overlap in tokens.
        overlap_size: usize,
    },
    /// The document has no whitespace-delimited tokens.
    #[error("document is empty")]
    EmptyDocument,
    /// The combiner was given nothing to combine.
    #[error("no summaries to combine")]
    NoSummaries,
}
