//! Fixed-stride window splitter.

use super::{WindowConfig, WindowError};

/// Split `text` into overlapping windows of `config.window_size` tokens.
///
/// Windows advance by `config.stride()` tokens while the end cursor is
/// strictly inside the document. The remainder from the last start offset is
/// always emitted as a final window, so it may be shorter than
/// `window_size` and may overlap its predecessor by more than
/// `overlap_size` tokens.
///
/// # Errors
/// Returns [`WindowError::InvalidWindowConfig`] for degenerate sizing and
/// [`WindowError::EmptyDocument`] when `text` has no tokens.
pub fn split_windows(text: &str, config: WindowConfig) -> Result<Vec<String>, WindowError> {
    config.validate()?;

    let tokens: Vec<&str> = text.split_whitespace().collect();
    if tokens.is_empty() {
        return Err(WindowError::EmptyDocument);
    }

    let stride = config.stride();
    let mut windows = Vec::with_capacity(tokens.len() / stride + 1);
    let mut start = 0;
    let mut end = config.window_size;

    while end < tokens.len() {
        windows.push(tokens[start..end].join(" "));
        start += stride;
        end += stride;
    }

    windows.push(tokens[start..].join(" "));
    Ok(windows)
}
