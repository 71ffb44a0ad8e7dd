//! Long-document summarization over sliding windows.

pub mod error;
pub mod windowed;

pub use error::SummarizeError;
pub use windowed::WindowedSummarizer;
