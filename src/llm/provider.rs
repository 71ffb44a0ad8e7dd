//! Prompt rendering and the text-generation seam.

use async_trait::async_trait;

use super::error::LlmError;

/// Substitution slot recognized by [`PromptTemplate`].
const TEXT_SLOT: &str = "{text}";

/// Executive-summary prompt used for the daily digest.
pub const DEFAULT_SUMMARY_TEMPLATE: &str = "Write a high-level executive summary of the following text, and then list the vital key points in bullet form. The summary should serve as a TL/DR for the content and contain the most important information. If there are topics that focus on marketing, local marketing, brand compliance, brand voice or similar topics included in the documents be sure to include these in the summary. If the document text does not focus on these topics you can include a section that talks about how to apply the information to local marketing.

{text}

SUMMARY:";

/// Prompt template with a single `{text}` substitution slot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PromptTemplate {
    template: String,
}

impl PromptTemplate {
    /// Parse a template.
    ///
    /// # Errors
    /// Returns [`LlmError::InvalidTemplate`] unless the template contains
    /// exactly one `{text}` slot.
    pub fn new(template: impl Into<String>) -> Result<Self, LlmError> {
        let template = template.into();
        let slots = template.matches(TEXT_SLOT).count();
        if slots != 1 {
            return Err(LlmError::InvalidTemplate(slots));
        }
        Ok(Self { template })
    }

    /// Substitute `text` into the slot.
    #[must_use]
    pub fn render(&self, text: &str) -> String {
        self.template.replacen(TEXT_SLOT, text, 1)
    }

    /// Raw template text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.template
    }
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self {
            template: DEFAULT_SUMMARY_TEMPLATE.to_string(),
        }
    }
}

/// A backend that turns a rendered prompt into generated text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate a completion for `prompt`.
    async fn generate(&self, prompt: &str) -> Result<String, LlmError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_substitutes_once() {
        let template = PromptTemplate::new("Summarize:\n{text}\nDone");
        let rendered = template.map(|t| t.render("body"));
        assert_eq!(rendered.ok(), Some("Summarize:\nbody\nDone".to_string()));
    }

    #[test]
    fn test_render_does_not_expand_slot_in_text() {
        let template = PromptTemplate::new("[{text}]").ok();
        let rendered = template.map(|t| t.render("{text}"));
        assert_eq!(rendered, Some("[{text}]".to_string()));
    }

    #[test]
    fn test_rejects_missing_or_repeated_slot() {
        assert!(matches!(
            PromptTemplate::new("no slot"),
            Err(LlmError::InvalidTemplate(0))
        ));
        assert!(matches!(
            PromptTemplate::new("{text} and {text}"),
            Err(LlmError::InvalidTemplate(2))
        ));
    }

    #[test]
    fn test_default_template_is_valid() {
        let default = PromptTemplate::default();
        assert!(PromptTemplate::new(default.as_str()).is_ok());
        assert!(default.render("X").contains("\n\nX\n\nSUMMARY:"));
    }
}
