//! Types shared by the content loaders.

use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

use super::error::ScrapingError;

/// Length of a YouTube video identifier.
const VIDEO_ID_LEN: usize = 11;

/// Where a pending item's content comes from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Source {
    /// A web page fetched over HTTP.
    Web {
        /// Page URL.
        url: String,
    },
    /// A YouTube video, summarized from its captions.
    YouTube {
        /// Video identifier.
        video_id: String,
    },
    /// A local document file.
    File {
        /// File path.
        path: PathBuf,
    },
}

impl Source {
    /// Classify a raw pending entry.
    ///
    /// Accepts `youtube.com/watch?v=ID`, `youtube.com/shorts/ID`,
    /// `youtu.be/ID`, a bare 11-character video id, or any other
    /// `http(s)` URL.
    ///
    /// # Errors
    /// Returns an error if the entry is neither a video id nor an HTTP URL.
    pub fn classify(raw: &str) -> Result<Self, ScrapingError> {
        let raw = raw.trim();
        if is_video_id(raw) {
            return Ok(Self::YouTube {
                video_id: raw.to_string(),
            });
        }

        let url = Url::parse(raw)?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ScrapingError::UnrecognizedSource(raw.to_string()));
        }

        if let Some(video_id) = youtube_video_id(&url) {
            return Ok(Self::YouTube { video_id });
        }

        Ok(Self::Web {
            url: url.to_string(),
        })
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Web { url } => write!(f, "{url}"),
            Self::YouTube { video_id } => {
                write!(f, "https://www.youtube.com/watch?v={video_id}")
            }
            Self::File { path } => write!(f, "{}", path.display()),
        }
    }
}

/// Extract a video id from a YouTube URL.
fn youtube_video_id(url: &Url) -> Option<String> {
    let host = url.host_str()?.trim_start_matches("www.").trim_start_matches("m.");
    let candidate = match host {
        "youtu.be" => url.path_segments()?.next().map(str::to_string),
        "youtube.com" => {
            let mut segments = url.path_segments()?;
            match segments.next() {
                Some("watch") => url
                    .query_pairs()
                    .find(|(k, _)| k == "v")
                    .map(|(_, v)| v.into_owned()),
                Some("shorts" | "embed" | "live") => segments.next().map(str::to_string),
                _ => None,
            }
        }
        _ => None,
    }?;

    is_video_id(&candidate).then_some(candidate)
}

/// Video ids are 11 characters of `[A-Za-z0-9_-]`.
fn is_video_id(s: &str) -> bool {
    s.len() == VIDEO_ID_LEN
        && s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Text loaded from a source, ready for summarization.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LoadedDocument {
    /// Where the text came from.
    pub source: Source,
    /// Page or video title, empty when unknown.
    pub title: String,
    /// Whitespace-normalized text.
    pub text: String,
    /// Word count.
    pub word_count: usize,
    /// When the content was loaded.
    pub loaded_at: DateTime<Utc>,
}

impl LoadedDocument {
    /// Build a document, counting its words.
    #[must_use]
    pub fn new(source: Source, title: impl Into<String>, text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            source,
            title: title.into(),
            word_count: text.split_whitespace().count(),
            text,
            loaded_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn youtube(id: &str) -> Option<Source> {
        Some(Source::YouTube {
            video_id: id.to_string(),
        })
    }

    #[test]
    fn test_classify_bare_video_id() {
        assert_eq!(Source::classify(" dQw4w9WgXcQ\n").ok(), youtube("dQw4w9WgXcQ"));
    }

    #[test]
    fn test_classify_youtube_urls() {
        for raw in [
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
            "https://youtube.com/watch?feature=share&v=dQw4w9WgXcQ",
            "https://m.youtube.com/watch?v=dQw4w9WgXcQ",
            "https://youtu.be/dQw4w9WgXcQ",
            "https://www.youtube.com/shorts/dQw4w9WgXcQ",
        ] {
            assert_eq!(Source::classify(raw).ok(), youtube("dQw4w9WgXcQ"), "{raw}");
        }
    }

    #[test]
    fn test_classify_web_url() {
        let source = Source::classify("https://example.com/post?id=1").ok();
        assert_eq!(
            source,
            Some(Source::Web {
                url: "https://example.com/post?id=1".to_string()
            })
        );
    }

    #[test]
    fn test_youtube_channel_page_is_web() {
        let source = Source::classify("https://www.youtube.com/@somechannel").ok();
        assert!(matches!(source, Some(Source::Web { .. })));
    }

    #[test]
    fn test_classify_rejects_garbage() {
        assert!(Source::classify("not a url").is_err());
        assert!(matches!(
            Source::classify("ftp://example.com/file"),
            Err(ScrapingError::UnrecognizedSource(_))
        ));
    }

    #[test]
    fn test_display_video_source() {
        let source = Source::YouTube {
            video_id: "dQw4w9WgXcQ".to_string(),
        };
        assert_eq!(
            source.to_string(),
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ"
        );
    }

    #[test]
    fn test_loaded_document_word_count() {
        let doc = LoadedDocument::new(
            Source::Web {
                url: "https://example.com/".to_string(),
            },
            "Title",
            "one two  three",
        );
        assert_eq!(doc.word_count, 3);
    }
}
