//! HTML page loading and main-text extraction.

use scraper::{ElementRef, Html, Selector};

use crate::scraping::config::LoaderConfig;
use crate::scraping::document::pdf_text;
use crate::scraping::error::ScrapingError;
use crate::scraping::types::{LoadedDocument, Source};

/// Selectors tried in order for the main content block.
const CONTENT_SELECTORS: [&str; 10] = [
    "article",
    "main",
    "[role='main']",
    ".post-content",
    ".article-content",
    ".entry-content",
    ".content",
    "#content",
    ".post",
    ".article",
];

/// Elements whose text never reaches the summarizer.
const HIDDEN_ELEMENTS: [&str; 4] = ["script", "style", "noscript", "template"];

/// Fetch a web page and extract its readable text.
///
/// HTML, XHTML, plain text and PDF bodies are accepted.
///
/// # Errors
/// Returns an error if the request fails, the body is too large or of an
/// unsupported type, or no text could be extracted.
pub async fn load_page(
    client: &reqwest::Client,
    url: &str,
    config: &LoaderConfig,
) -> Result<LoadedDocument, ScrapingError> {
    let response = client.get(url).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(ScrapingError::HttpStatus(status.as_u16()));
    }

    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("text/html")
        .to_ascii_lowercase();

    let source = Source::Web {
        url: url.to_string(),
    };

    if content_type.contains("application/pdf") {
        let bytes = read_limited(response, config.max_content_length).await?;
        let text = pdf_text(bytes).await?;
        return non_empty(LoadedDocument::new(source, "", text));
    }

    if content_type.contains("text/plain") {
        let body = read_text_limited(response, config.max_content_length).await?;
        return non_empty(LoadedDocument::new(source, "", clean_text(&body)));
    }

    if !content_type.contains("text/html") && !content_type.contains("application/xhtml") {
        return Err(ScrapingError::UnsupportedContentType(content_type));
    }

    let html = read_text_limited(response, config.max_content_length).await?;
    non_empty(extract_document(&html, source, config))
}

/// Read a response body, failing as soon as it grows past `limit` bytes.
///
/// The declared `Content-Length` is checked first, but chunked or unlabeled
/// bodies are bounded while streaming.
///
/// # Errors
/// Returns an error if the body exceeds `limit` or the transfer fails.
pub(crate) async fn read_limited(
    mut response: reqwest::Response,
    limit: usize,
) -> Result<Vec<u8>, ScrapingError> {
    if let Some(len) = response.content_length() {
        if usize::try_from(len).map_or(true, |len| len > limit) {
            return Err(too_large(len));
        }
    }

    let mut body = Vec::new();
    while let Some(chunk) = response.chunk().await? {
        if body.len() + chunk.len() > limit {
            return Err(too_large(body.len() + chunk.len()));
        }
        body.extend_from_slice(&chunk);
    }
    Ok(body)
}

/// [`read_limited`], decoded as UTF-8 (invalid sequences replaced).
pub(crate) async fn read_text_limited(
    response: reqwest::Response,
    limit: usize,
) -> Result<String, ScrapingError> {
    let bytes = read_limited(response, limit).await?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn too_large(len: impl std::fmt::Display) -> ScrapingError {
    ScrapingError::ExtractionFailed(format!("Content too large: at least {len} bytes"))
}

fn non_empty(document: LoadedDocument) -> Result<LoadedDocument, ScrapingError> {
    if document.word_count == 0 {
        return Err(ScrapingError::ExtractionFailed(format!(
            "no text found at {}",
            document.source
        )));
    }
    Ok(document)
}

/// Extract title and main text from an HTML document.
#[must_use]
pub fn extract_document(html: &str, source: Source, config: &LoaderConfig) -> LoadedDocument {
    let document = Html::parse_document(html);
    let title = extract_title(&document);
    let text = extract_main_text(&document, config.min_main_text_words);
    LoadedDocument::new(source, title, text)
}

/// Extract page title.
pub(super) fn extract_title(document: &Html) -> String {
    if let Some(og_title) = extract_meta(document, "og:title") {
        return og_title;
    }

    for tag in ["title", "h1"] {
        if let Ok(selector) = Selector::parse(tag) {
            if let Some(element) = document.select(&selector).next() {
                let title = clean_text(&element.text().collect::<String>());
                if !title.is_empty() {
                    return title;
                }
            }
        }
    }

    String::new()
}

/// Extract meta tag content by `name` or `property`.
fn extract_meta(document: &Html, name: &str) -> Option<String> {
    for attr in ["name", "property"] {
        let selector_str = format!("meta[{attr}='{name}']");
        let Ok(selector) = Selector::parse(&selector_str) else {
            continue;
        };
        let content = document
            .select(&selector)
            .next()
            .and_then(|element| element.value().attr("content"))
            .map(str::trim)
            .filter(|content| !content.is_empty());
        if let Some(content) = content {
            return Some(content.to_string());
        }
    }
    None
}

/// Extract main text content from the page.
fn extract_main_text(document: &Html, min_words: usize) -> String {
    for selector_str in CONTENT_SELECTORS {
        if let Ok(selector) = Selector::parse(selector_str) {
            if let Some(element) = document.select(&selector).next() {
                let text = visible_text(element);
                if text.split_whitespace().count() > min_words {
                    return text;
                }
            }
        }
    }

    // Fallback: whole body
    if let Ok(body_selector) = Selector::parse("body") {
        if let Some(body) = document.select(&body_selector).next() {
            return visible_text(body);
        }
    }

    String::new()
}

/// Text of `element`, skipping scripts, styles and similar.
fn visible_text(element: ElementRef<'_>) -> String {
    let mut text = String::new();
    for node in element.descendants() {
        let Some(fragment) = node.value().as_text() else {
            continue;
        };
        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|e| HIDDEN_ELEMENTS.contains(&e.name()))
        });
        if hidden {
            continue;
        }
        let trimmed = fragment.trim();
        if !trimmed.is_empty() {
            if !text.is_empty() {
                text.push(' ');
            }
            text.push_str(trimmed);
        }
    }
    clean_text(&text)
}

/// Collapse all whitespace runs into single spaces.
pub(crate) fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
