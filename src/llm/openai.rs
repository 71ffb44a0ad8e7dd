//! OpenAI-compatible chat-completions client.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

use super::error::LlmError;
use super::provider::TextGenerator;

/// Default API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";
/// Default model, a long-context chat model.
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo-16k";
/// Generations can be slow for long windows.
const CLIENT_TIMEOUT: Duration = Duration::from_secs(180);

/// Chat-completions client sending one user message per prompt.
pub struct OpenAiClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
    temperature: f32,
}

impl OpenAiClient {
    /// Create a client for `model` at `base_url`.
    ///
    /// # Errors
    /// Returns an error if the API key is empty or the HTTP client cannot be
    /// built.
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, LlmError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(LlmError::NotConfigured("missing API key".to_string()));
        }

        let client = reqwest::Client::builder()
            .timeout(CLIENT_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            api_key,
            model: model.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            temperature: 0.0,
        })
    }

    /// Override the sampling temperature.
    #[must_use]
    pub const fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Model name sent with every request.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/v1/chat/completions", self.base_url)
    }
}

#[async_trait]
impl TextGenerator for OpenAiClient {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        let url = self.endpoint();
        let body = json!({
            "model": self.model,
            "messages": [{ "role": "user", "content": prompt }],
            "temperature": self.temperature,
        });

        debug!(model = %self.model, prompt_chars = prompt.len(), "chat completion request");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let value: serde_json::Value = response.json().await?;
        extract_content(&value)
    }
}

/// Pull `choices[0].message.content` out of a completion response.
fn extract_content(value: &serde_json::Value) -> Result<String, LlmError> {
    value["choices"][0]["message"]["content"]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| LlmError::Parse("missing choices[0].message.content".to_string()))
}
