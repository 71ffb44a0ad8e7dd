//! Error types for windowed summarization.

use thiserror::Error;

use crate::llm::LlmError;
use crate::windowing::WindowError;

/// Errors raised while summarizing a document.
#[derive(Debug, Error)]
pub enum SummarizeError {
    /// Splitting or combining failed.
    #[error(transparent)]
    Window(#[from] WindowError),
    /// The generator failed on one window; later windows were not attempted.
    #[error("window {index} of {total} failed: {source}")]
    Generation {
        /// Zero-based index of the failing window.
        index: usize,
        /// Number of windows in the document.
        total: usize,
        /// Underlying backend error.
        #[source]
        source: LlmError,
    },
}
