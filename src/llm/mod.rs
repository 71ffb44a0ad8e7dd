//! Text-generation backends used to summarize document windows.

pub mod error;
pub mod openai;
pub mod provider;

pub use error::LlmError;
pub use openai::OpenAiClient;
pub use provider::{PromptTemplate, TextGenerator};
