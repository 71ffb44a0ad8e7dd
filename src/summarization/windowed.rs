//! Split, summarize each window in order, and stitch the results.

use std::sync::Arc;

use tracing::{debug, info};

use crate::llm::{PromptTemplate, TextGenerator};
use crate::windowing::{WindowConfig, combine_summaries, split_windows};

use super::error::SummarizeError;

/// Summarizes long documents window by window.
///
/// Calls are issued one at a time in window order; the first failure aborts
/// the document.
pub struct WindowedSummarizer {
    generator: Arc<dyn TextGenerator>,
    template: PromptTemplate,
    window: WindowConfig,
}

impl WindowedSummarizer {
    /// Create a summarizer.
    ///
    /// # Errors
    /// Returns an error if `window` is not a valid configuration.
    pub fn new(
        generator: Arc<dyn TextGenerator>,
        template: PromptTemplate,
        window: WindowConfig,
    ) -> Result<Self, SummarizeError> {
        window.validate()?;
        Ok(Self {
            generator,
            template,
            window,
        })
    }

    /// Window sizing in use.
    #[must_use]
    pub const fn window(&self) -> WindowConfig {
        self.window
    }

    /// Summarize `text` and return the combined summary.
    ///
    /// # Errors
    /// Returns an error for empty text or when any window's generation fails.
    pub async fn summarize(&self, text: &str) -> Result<String, SummarizeError> {
        let windows = split_windows(text, self.window)?;
        info!(windows = windows.len(), "summarizing document");

        let summaries = self.summarize_windows(&windows).await?;
        Ok(combine_summaries(&summaries, self.window.overlap_size)?)
    }

    /// Summarize each window in order, one generator call per window.
    ///
    /// # Errors
    /// Returns [`SummarizeError::Generation`] for the first failing window.
    pub async fn summarize_windows(
        &self,
        windows: &[String],
    ) -> Result<Vec<String>, SummarizeError> {
        let total = windows.len();
        let mut summaries = Vec::with_capacity(total);

        for (index, window) in windows.iter().enumerate() {
            let prompt = self.template.render(window);
            debug!(index, total, "generating window summary");
            let summary = self
                .generator
                .generate(&prompt)
                .await
                .map_err(|source| SummarizeError::Generation {
                    index,
                    total,
                    source,
                })?;
            summaries.push(summary);
        }

        Ok(summaries)
    }
}
