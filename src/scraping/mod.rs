//! Content loading for pending items.
//!
//! Turns a pending entry into plain text:
//! - Web pages (main-text extraction from HTML, plain text or PDF bodies)
//! - YouTube videos (caption transcripts)
//! - Local documents (`.txt`, `.md`, `.pdf`)
//!
//! Every body is read with the configured size limit.

pub mod config;
pub mod content;
pub mod document;
pub mod error;
pub mod types;
pub mod youtube;

pub use config::LoaderConfig;
pub use error::ScrapingError;
pub use types::{LoadedDocument, Source};

use async_trait::async_trait;

/// Something that can turn a [`Source`] into text.
#[async_trait]
pub trait DocumentLoader: Send + Sync {
    /// Load the text behind `source`.
    async fn load(&self, source: &Source) -> Result<LoadedDocument, ScrapingError>;
}

/// HTTP-backed loader for web pages and YouTube transcripts.
pub struct ContentLoader {
    config: LoaderConfig,
    client: reqwest::Client,
}

impl ContentLoader {
    /// Create a new loader with the given configuration.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: LoaderConfig) -> Result<Self, ScrapingError> {
        let client = Self::build_client(&config)?;
        Ok(Self { config, client })
    }

    /// Create a new loader with default configuration.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn with_defaults() -> Result<Self, ScrapingError> {
        Self::new(LoaderConfig::default())
    }

    /// Build an HTTP client with appropriate headers and settings.
    fn build_client(config: &LoaderConfig) -> Result<reqwest::Client, ScrapingError> {
        use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, HeaderMap, HeaderValue, USER_AGENT};

        let mut headers = HeaderMap::new();

        let ua = config.random_user_agent();
        if let Ok(ua_value) = HeaderValue::from_str(&ua) {
            headers.insert(USER_AGENT, ua_value);
        }

        headers.insert(
            ACCEPT,
            HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,text/plain;q=0.8,*/*;q=0.5",
            ),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.5"));

        reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .cookie_store(true)
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .build()
            .map_err(|e| ScrapingError::HttpClient(e.to_string()))
    }

    /// Loader configuration.
    #[must_use]
    pub const fn config(&self) -> &LoaderConfig {
        &self.config
    }
}

#[async_trait]
impl DocumentLoader for ContentLoader {
    async fn load(&self, source: &Source) -> Result<LoadedDocument, ScrapingError> {
        tracing::info!(%source, "loading content");
        let document = match source {
            Source::Web { url } => content::load_page(&self.client, url, &self.config).await?,
            Source::YouTube { video_id } => {
                youtube::load_transcript(&self.client, video_id, &self.config).await?
            }
            Source::File { path } => document::load_file(path, &self.config).await?,
        };
        tracing::debug!(%source, words = document.word_count, "content loaded");
        Ok(document)
    }
}
