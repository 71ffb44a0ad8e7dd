//! Configuration for the content loaders.

use std::time::Duration;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Configuration for [`super::ContentLoader`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LoaderConfig {
    /// Request timeout.
    #[serde(with = "duration_serde")]
    pub request_timeout: Duration,
    /// Connection timeout.
    #[serde(with = "duration_serde")]
    pub connect_timeout: Duration,
    /// User agents to rotate.
    pub user_agents: Vec<String>,
    /// Maximum content length to download (bytes).
    pub max_content_length: usize,
    /// Minimum word count for a content block to be taken as the main text.
    pub min_main_text_words: usize,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            user_agents: default_user_agents(),
            max_content_length: 10 * 1024 * 1024, // 10 MB
            min_main_text_words: 50,
        }
    }
}

impl LoaderConfig {
    /// Set request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Set the download size limit.
    #[must_use]
    pub const fn with_max_content_length(mut self, bytes: usize) -> Self {
        self.max_content_length = bytes;
        self
    }

    /// Get a random user agent from the rotation list.
    #[must_use]
    pub fn random_user_agent(&self) -> String {
        if self.user_agents.is_empty() {
            return FALLBACK_USER_AGENT.to_string();
        }
        let mut rng = rand::thread_rng();
        let idx = rng.gen_range(0..self.user_agents.len());
        self.user_agents[idx].clone()
    }
}

const FALLBACK_USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Default user agents for rotation.
fn default_user_agents() -> Vec<String> {
    vec![
        // Chrome on Windows
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".to_string(),
        // Firefox on macOS
        "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.15; rv:121.0) Gecko/20100101 Firefox/121.0".to_string(),
        // Safari on macOS
        "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.2 Safari/605.1.15".to_string(),
        FALLBACK_USER_AGENT.to_string(),
    ]
}

/// Durations are stored as whole seconds.
mod duration_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_secs().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LoaderConfig::default();
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.min_main_text_words, 50);
    }

    #[test]
    fn test_config_builder() {
        let config = LoaderConfig::default()
            .with_timeout(Duration::from_secs(60))
            .with_max_content_length(1024);
        assert_eq!(config.request_timeout, Duration::from_secs(60));
        assert_eq!(config.max_content_length, 1024);
    }

    #[test]
    fn test_random_user_agent() {
        let mut config = LoaderConfig::default();
        assert!(config.random_user_agent().contains("Mozilla"));

        config.user_agents.clear();
        assert_eq!(config.random_user_agent(), FALLBACK_USER_AGENT);
    }

    #[test]
    fn test_durations_serialize_as_seconds() {
        let json = serde_json::to_value(LoaderConfig::default()).unwrap_or_default();
        assert_eq!(json["request_timeout"], 30);
        assert_eq!(json["connect_timeout"], 10);
    }
}
