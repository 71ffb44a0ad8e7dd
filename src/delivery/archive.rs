//! Local append-only record of every summary produced.

use std::path::{Path, PathBuf};

use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;

use super::error::DeliveryError;

/// Appends summaries to a text file, one block per summary.
pub struct SummaryArchive {
    path: PathBuf,
}

impl SummaryArchive {
    /// Archive writing to `path`, created on first append.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append `summary` followed by a newline.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened or written.
    pub async fn append(&self, summary: &str) -> Result<(), DeliveryError> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(summary.as_bytes()).await?;
        file.write_all(b"\n").await?;
        file.flush().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_append_accumulates() {
        let Ok(dir) = tempfile::tempdir() else { return };
        let archive = SummaryArchive::new(dir.path().join("summaries.txt"));

        assert!(archive.append("first").await.is_ok());
        assert!(archive.append("second\nline").await.is_ok());

        let raw = std::fs::read_to_string(archive.path()).unwrap_or_default();
        assert_eq!(raw, "first\nsecond\nline\n");
    }
}
