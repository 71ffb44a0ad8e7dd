//! Application configuration, resolved once at startup.
//!
//! Every setting comes from an environment variable. [`AppConfig::from_lookup`]
//! accepts any key lookup so the rest of the crate never reads process
//! state directly.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::delivery::smtp::DEFAULT_RELAY_PORT;
use crate::llm::openai::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use crate::scraping::LoaderConfig;
use crate::windowing::WindowConfig;

/// Default Postmark SMTP relay.
pub const DEFAULT_RELAY_HOST: &str = "smtp.postmarkapp.com";
/// Default pending-items file.
pub const DEFAULT_TODO_PATH: &str = "todo.txt";
/// Default HTTP port.
pub const DEFAULT_PORT: u16 = 3000;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required variable is unset or blank.
    #[error("missing required setting {0}")]
    Missing(&'static str),
    /// A variable is set but unusable.
    #[error("invalid value for {key}: {reason}")]
    Invalid {
        /// Variable name.
        key: &'static str,
        /// What is wrong with it.
        reason: String,
    },
}

/// Where pending items live.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "backend", rename_all = "snake_case")]
pub enum StoreBackend {
    /// Local file, one entry per line.
    File {
        /// File path.
        path: PathBuf,
    },
    /// Airtable table with a `URL` field.
    Airtable {
        /// Personal access token.
        api_key: String,
        /// Base identifier.
        base_id: String,
        /// Table name or id.
        table: String,
    },
}

/// Top-level configuration passed to the digest job and the server.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AppConfig {
    /// LLM provider API key.
    pub api_key: String,
    /// Digest sender address.
    pub sender: String,
    /// Digest receiver address.
    pub receiver: String,
    /// SMTP relay host.
    pub relay_host: String,
    /// SMTP relay port.
    pub relay_port: u16,
    /// Relay server token, used as SMTP username and password.
    pub relay_token: Option<String>,
    /// Completion model name.
    pub model: String,
    /// Completion API root.
    pub llm_base_url: String,
    /// Shared secret required by the HTTP API.
    pub access_key: Option<String>,
    /// Pending-item backend.
    pub store: StoreBackend,
    /// Window sizing for long documents.
    pub window: WindowConfig,
    /// Optional file every summary is appended to.
    pub archive_path: Option<PathBuf>,
    /// Optional directory of `.txt`, `.md` and `.pdf` files summarized
    /// after the queued URLs.
    pub documents_dir: Option<PathBuf>,
    /// HTTP port.
    pub port: u16,
    /// Content loader settings.
    pub loader: LoaderConfig,
}

impl AppConfig {
    /// Read configuration from the process environment.
    ///
    /// # Errors
    /// Returns an error if a required variable is missing or any value is
    /// invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`. Blank values count as unset.
    ///
    /// # Errors
    /// Returns an error if a required key is missing or any value is invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let require = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));

        let store = match get("CURATOR_STORE").as_deref() {
            None | Some("file") => StoreBackend::File {
                path: get("CURATOR_TODO_PATH")
                    .map_or_else(|| PathBuf::from(DEFAULT_TODO_PATH), PathBuf::from),
            },
            Some("airtable") => StoreBackend::Airtable {
                api_key: require("AIRTABLE_API_KEY")?,
                base_id: require("AIRTABLE_BASE_ID")?,
                table: require("AIRTABLE_TABLE_NAME")?,
            },
            Some(other) => {
                return Err(ConfigError::Invalid {
                    key: "CURATOR_STORE",
                    reason: format!("unknown backend {other:?}, expected file or airtable"),
                });
            }
        };

        let defaults = WindowConfig::default();
        let window = WindowConfig {
            window_size: parse_or(get("CURATOR_WINDOW_SIZE"), "CURATOR_WINDOW_SIZE", defaults.window_size)?,
            overlap_size: parse_or(get("CURATOR_OVERLAP_SIZE"), "CURATOR_OVERLAP_SIZE", defaults.overlap_size)?,
        };

        let config = Self {
            api_key: require("OPENAI_API_KEY")?,
            sender: require("CURATOR_SENDER")?,
            receiver: require("CURATOR_RECEIVER")?,
            relay_host: get("CURATOR_RELAY_HOST").unwrap_or_else(|| DEFAULT_RELAY_HOST.to_string()),
            relay_port: parse_or(get("CURATOR_RELAY_PORT"), "CURATOR_RELAY_PORT", DEFAULT_RELAY_PORT)?,
            relay_token: get("CURATOR_RELAY_TOKEN"),
            model: get("CURATOR_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            llm_base_url: get("CURATOR_LLM_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            access_key: get("CURATOR_ACCESS_KEY"),
            store,
            window,
            archive_path: get("CURATOR_ARCHIVE_PATH").map(PathBuf::from),
            documents_dir: get("CURATOR_DOCS_DIR").map(PathBuf::from),
            port: parse_or(get("CURATOR_PORT"), "CURATOR_PORT", DEFAULT_PORT)?,
            loader: LoaderConfig::default(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration invariants.
    ///
    /// # Errors
    /// Returns an error if any value is out of range or invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.window.validate().map_err(|e| ConfigError::Invalid {
            key: if self.window.window_size == 0 {
                "CURATOR_WINDOW_SIZE"
            } else {
                "CURATOR_WINDOW_SIZE/CURATOR_OVERLAP_SIZE"
            },
            reason: e.to_string(),
        })?;

        Url::parse(&self.llm_base_url).map_err(|e| ConfigError::Invalid {
            key: "CURATOR_LLM_BASE_URL",
            reason: e.to_string(),
        })?;

        if self.relay_host.contains(['/', ' ']) {
            return Err(ConfigError::Invalid {
                key: "CURATOR_RELAY_HOST",
                reason: "expected a bare host name".to_string(),
            });
        }

        Ok(())
    }
}

fn parse_or<T>(value: Option<String>, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.map_or(Ok(default), |raw| {
        raw.parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            reason: e.to_string(),
        })
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    const REQUIRED: [(&str, &str); 3] = [
        ("OPENAI_API_KEY", "sk-test"),
        ("CURATOR_SENDER", "digest@example.com"),
        ("CURATOR_RECEIVER", "reader@example.com"),
    ];

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(lookup(&REQUIRED));
        assert!(config.is_ok());
        let Ok(config) = config else { return };

        assert_eq!(config.relay_host, DEFAULT_RELAY_HOST);
        assert_eq!(config.relay_port, 587);
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.window, WindowConfig::default());
        assert_eq!(
            config.store,
            StoreBackend::File {
                path: PathBuf::from("todo.txt")
            }
        );
        assert!(config.access_key.is_none());
        assert!(config.archive_path.is_none());
        assert!(config.documents_dir.is_none());
    }

    #[test]
    fn test_documents_dir() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("CURATOR_DOCS_DIR", "summarizeDocs"));
        let dir = AppConfig::from_lookup(lookup(&pairs)).map(|c| c.documents_dir).ok();
        assert_eq!(dir, Some(Some(PathBuf::from("summarizeDocs"))));
    }

    #[test]
    fn test_missing_required() {
        let result = AppConfig::from_lookup(lookup(&REQUIRED[..2]));
        assert!(matches!(result, Err(ConfigError::Missing("CURATOR_RECEIVER"))));
    }

    #[test]
    fn test_blank_counts_as_missing() {
        let mut pairs = REQUIRED.to_vec();
        pairs[0] = ("OPENAI_API_KEY", "   ");
        let result = AppConfig::from_lookup(lookup(&pairs));
        assert!(matches!(result, Err(ConfigError::Missing("OPENAI_API_KEY"))));
    }

    #[test]
    fn test_airtable_backend() {
        let mut pairs = REQUIRED.to_vec();
        pairs.extend([
            ("CURATOR_STORE", "airtable"),
            ("AIRTABLE_API_KEY", "pat123"),
            ("AIRTABLE_BASE_ID", "appXYZ"),
            ("AIRTABLE_TABLE_NAME", "Links"),
        ]);
        let store = AppConfig::from_lookup(lookup(&pairs)).map(|c| c.store).ok();
        assert_eq!(
            store,
            Some(StoreBackend::Airtable {
                api_key: "pat123".to_string(),
                base_id: "appXYZ".to_string(),
                table: "Links".to_string(),
            })
        );
    }

    #[test]
    fn test_airtable_requires_settings() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("CURATOR_STORE", "airtable"));
        let result = AppConfig::from_lookup(lookup(&pairs));
        assert!(matches!(result, Err(ConfigError::Missing("AIRTABLE_API_KEY"))));
    }

    #[test]
    fn test_unknown_backend() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("CURATOR_STORE", "sheets"));
        let result = AppConfig::from_lookup(lookup(&pairs));
        assert!(matches!(
            result,
            Err(ConfigError::Invalid {
                key: "CURATOR_STORE",
                ..
            })
        ));
    }

    #[test]
    fn test_window_overrides_are_validated() {
        let mut pairs = REQUIRED.to_vec();
        pairs.extend([("CURATOR_WINDOW_SIZE", "100"), ("CURATOR_OVERLAP_SIZE", "100")]);
        assert!(matches!(
            AppConfig::from_lookup(lookup(&pairs)),
            Err(ConfigError::Invalid {
                key: "CURATOR_WINDOW_SIZE/CURATOR_OVERLAP_SIZE",
                ..
            })
        ));

        let mut pairs = REQUIRED.to_vec();
        pairs.push(("CURATOR_WINDOW_SIZE", "0"));
        assert!(matches!(
            AppConfig::from_lookup(lookup(&pairs)),
            Err(ConfigError::Invalid {
                key: "CURATOR_WINDOW_SIZE",
                ..
            })
        ));

        let mut pairs = REQUIRED.to_vec();
        pairs.extend([("CURATOR_WINDOW_SIZE", "100"), ("CURATOR_OVERLAP_SIZE", "10")]);
        let window = AppConfig::from_lookup(lookup(&pairs)).map(|c| c.window).ok();
        assert_eq!(
            window,
            Some(WindowConfig {
                window_size: 100,
                overlap_size: 10
            })
        );
    }

    #[test]
    fn test_invalid_number() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("CURATOR_RELAY_PORT", "smtp"));
        let result = AppConfig::from_lookup(lookup(&pairs));
        assert!(matches!(
            result,
            Err(ConfigError::Invalid {
                key: "CURATOR_RELAY_PORT",
                ..
            })
        ));
    }

    #[test]
    fn test_invalid_llm_base_url() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("CURATOR_LLM_BASE_URL", "not a url"));
        assert!(AppConfig::from_lookup(lookup(&pairs)).is_err());
    }
}
