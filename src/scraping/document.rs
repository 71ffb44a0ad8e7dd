//! Local document loading (`.txt`, `.md`, `.pdf`).

use std::path::{Path, PathBuf};

use crate::scraping::config::LoaderConfig;
use crate::scraping::content::clean_text;
use crate::scraping::error::ScrapingError;
use crate::scraping::types::{LoadedDocument, Source};

/// File extensions picked up from a documents directory.
pub const SUPPORTED_EXTENSIONS: [&str; 4] = ["txt", "text", "md", "pdf"];

/// Lowercased extension of `path`, if any.
fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
}

/// Whether `path` has an extension this module can read.
#[must_use]
pub fn is_supported(path: &Path) -> bool {
    extension(path).is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext.as_str()))
}

/// List the readable documents in `dir`, sorted by file name.
///
/// A missing directory holds no documents.
///
/// # Errors
/// Returns an error if the directory exists but cannot be read.
pub async fn list_documents(dir: &Path) -> Result<Vec<PathBuf>, ScrapingError> {
    let mut entries = match tokio::fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };

    let mut paths = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if entry.file_type().await?.is_file() && is_supported(&path) {
            paths.push(path);
        } else {
            tracing::debug!(path = %path.display(), "skipping unsupported entry");
        }
    }
    paths.sort();
    Ok(paths)
}

/// Read and extract a local document.
///
/// # Errors
/// Returns an error if the file is too large, cannot be read, has an
/// unsupported extension, or yields no text.
pub async fn load_file(path: &Path, config: &LoaderConfig) -> Result<LoadedDocument, ScrapingError> {
    let ext = extension(path).unwrap_or_default();
    if !SUPPORTED_EXTENSIONS.contains(&ext.as_str()) {
        return Err(ScrapingError::UnsupportedContentType(format!(
            "{} ({ext:?} files are not supported)",
            path.display()
        )));
    }

    let size = tokio::fs::metadata(path).await?.len();
    if usize::try_from(size).map_or(true, |size| size > config.max_content_length) {
        return Err(ScrapingError::ExtractionFailed(format!(
            "Content too large: {size} bytes"
        )));
    }

    let bytes = tokio::fs::read(path).await?;
    let text = if ext == "pdf" {
        pdf_text(bytes).await?
    } else {
        clean_text(&String::from_utf8_lossy(&bytes))
    };

    if text.is_empty() {
        return Err(ScrapingError::ExtractionFailed(format!(
            "no text found in {}",
            path.display()
        )));
    }

    let title = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(LoadedDocument::new(
        Source::File {
            path: path.to_path_buf(),
        },
        title,
        text,
    ))
}

/// Extract the text of a PDF held in memory.
///
/// Parsing is CPU-bound and runs on the blocking pool.
///
/// # Errors
/// Returns an error if the PDF cannot be parsed.
pub async fn pdf_text(bytes: Vec<u8>) -> Result<String, ScrapingError> {
    let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
        .await
        .map_err(|e| ScrapingError::Pdf(e.to_string()))?
        .map_err(|e| ScrapingError::Pdf(e.to_string()))?;
    Ok(clean_text(&text))
}
