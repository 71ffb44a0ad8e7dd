//! Sliding-window splitting of long documents and stitching of the
//! per-window summaries back into one text.
//!
//! Tokens are whitespace-delimited words. Consecutive windows share
//! `overlap_size` tokens, except the tail window which always covers
//! whatever remains after the last full stride.

pub mod combiner;
pub mod error;
pub mod splitter;

pub use combiner::combine_summaries;
pub use error::WindowError;
pub use splitter::split_windows;

use serde::{Deserialize, Serialize};

/// Window sizing, expressed in whitespace tokens.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Number of tokens per window.
    pub window_size: usize,
    /// Number of tokens shared by consecutive windows.
    pub overlap_size: usize,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            window_size: 3000,
            overlap_size: 200,
        }
    }
}

impl WindowConfig {
    /// Build a validated window configuration.
    ///
    /// # Errors
    /// Returns [`WindowError::InvalidWindowConfig`] unless
    /// `window_size > overlap_size`.
    pub const fn new(window_size: usize, overlap_size: usize) -> Result<Self, WindowError> {
        let config = Self {
            window_size,
            overlap_size,
        };
        match config.validate() {
            Ok(()) => Ok(config),
            Err(e) => Err(e),
        }
    }

    /// Check that the sizing makes forward progress.
    ///
    /// # Errors
    /// Returns [`WindowError::InvalidWindowConfig`] when `window_size` is zero
    /// or not strictly larger than `overlap_size`.
    pub const fn validate(&self) -> Result<(), WindowError> {
        if self.window_size == 0 || self.overlap_size >= self.window_size {
            return Err(WindowError::InvalidWindowConfig {
                window_size: self.window_size,
                overlap_size: self.overlap_size,
            });
        }
        Ok(())
    }

    /// Tokens advanced between the starts of consecutive windows.
    #[must_use]
    pub const fn stride(&self) -> usize {
        self.window_size.saturating_sub(self.overlap_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_overlap_equal_to_window() {
        let err = WindowConfig::new(4, 4);
        assert_eq!(
            err,
            Err(WindowError::InvalidWindowConfig {
                window_size: 4,
                overlap_size: 4
            })
        );
    }

    #[test]
    fn test_new_rejects_zero_window() {
        assert!(WindowConfig::new(0, 0).is_err());
    }

    #[test]
    fn test_stride() {
        let config = WindowConfig::new(10, 3);
        assert_eq!(config.map(|c| c.stride()), Ok(7));
    }

    #[test]
    fn test_default_is_valid() {
        assert!(WindowConfig::default().validate().is_ok());
    }
}
