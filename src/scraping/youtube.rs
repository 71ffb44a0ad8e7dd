//! YouTube transcript loading.
//!
//! The watch page embeds the player response, which lists caption tracks
//! with a timed-text URL. The first track is fetched and its cues joined
//! into plain text.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Selector};

use crate::scraping::config::LoaderConfig;
use crate::scraping::content::{clean_text, extract_title, read_text_limited};
use crate::scraping::error::ScrapingError;
use crate::scraping::types::{LoadedDocument, Source};

const WATCH_URL: &str = "https://www.youtube.com/watch";

/// First caption track URL embedded in the player response.
static CAPTION_TRACK: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r#""captionTracks":\[\{"baseUrl":"([^"]+)""#));

/// Load the transcript of `video_id`.
///
/// # Errors
/// Returns an error if the watch page cannot be fetched, either body is
/// larger than the configured limit, the video has no caption track, or the
/// transcript is empty.
pub async fn load_transcript(
    client: &reqwest::Client,
    video_id: &str,
    config: &LoaderConfig,
) -> Result<LoadedDocument, ScrapingError> {
    let url = format!("{WATCH_URL}?v={}&hl=en", urlencoding::encode(video_id));
    transcript_from_page(client, &url, video_id, config).await
}

async fn transcript_from_page(
    client: &reqwest::Client,
    page_url: &str,
    video_id: &str,
    config: &LoaderConfig,
) -> Result<LoadedDocument, ScrapingError> {
    let page = fetch_text(client, page_url, config).await?;

    let track_url = caption_track_url(&page)?
        .ok_or_else(|| ScrapingError::NoTranscript(video_id.to_string()))?;
    let title = extract_title(&Html::parse_document(&page))
        .trim_end_matches(" - YouTube")
        .to_string();

    tracing::debug!(video_id, "fetching caption track");
    let xml = fetch_text(client, &track_url, config).await?;

    let text = parse_transcript(&xml)?;
    if text.is_empty() {
        return Err(ScrapingError::NoTranscript(video_id.to_string()));
    }

    Ok(LoadedDocument::new(
        Source::YouTube {
            video_id: video_id.to_string(),
        },
        title,
        text,
    ))
}

async fn fetch_text(
    client: &reqwest::Client,
    url: &str,
    config: &LoaderConfig,
) -> Result<String, ScrapingError> {
    let response = client.get(url).send().await?;
    if !response.status().is_success() {
        return Err(ScrapingError::HttpStatus(response.status().as_u16()));
    }
    read_text_limited(response, config.max_content_length).await
}

/// Find the first caption track URL in a watch page.
fn caption_track_url(page: &str) -> Result<Option<String>, ScrapingError> {
    let re = CAPTION_TRACK.as_ref().map_err(Clone::clone)?;
    Ok(re
        .captures(page)
        .and_then(|caps| caps.get(1))
        .map(|m| unescape_json_url(m.as_str())))
}

/// Undo the JSON escaping YouTube applies to embedded URLs.
fn unescape_json_url(raw: &str) -> String {
    raw.replace("\\u0026", "&")
        .replace("\\u003d", "=")
        .replace("\\/", "/")
}

/// Join the cues of a timed-text document.
fn parse_transcript(xml: &str) -> Result<String, ScrapingError> {
    let selector = Selector::parse("text")
        .map_err(|e| ScrapingError::ExtractionFailed(e.to_string()))?;
    let fragment = Html::parse_fragment(xml);
    let cues: Vec<String> = fragment
        .select(&selector)
        .map(|cue| decode_cue(&cue.text().collect::<String>()))
        .collect();
    Ok(clean_text(&cues.join(" ")))
}

/// Captions are usually escaped twice (`&amp;#39;`), so the text left after
/// the first parse may still hold entities or inline markup such as `<font>`.
fn decode_cue(text: &str) -> String {
    if !text.contains(['&', '<']) {
        return text.to_string();
    }
    Html::parse_fragment(text).root_element().text().collect()
}
