//! `todo.txt`-style store: one entry per line.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::debug;

use super::error::StoreResult;
use super::{PendingItem, PendingStore, normalize_entry};

/// File-backed pending store.
///
/// Blank lines are ignored and a missing file reads as empty. Item ids are
/// 1-based positions among the non-blank lines.
pub struct FlatFileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FlatFileStore {
    /// Create a store over `path`. The file is created on first write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_contents(&self) -> StoreResult<String> {
        match fs::read_to_string(&self.path).await {
            Ok(contents) => Ok(contents),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(String::new()),
            Err(e) => Err(e.into()),
        }
    }
}

fn parse_lines(contents: &str) -> Vec<PendingItem> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .enumerate()
        .map(|(i, line)| PendingItem {
            id: (i + 1).to_string(),
            url: line.to_string(),
        })
        .collect()
}

#[async_trait]
impl PendingStore for FlatFileStore {
    async fn add(&self, url: &str) -> StoreResult<PendingItem> {
        let entry = normalize_entry(url)?;
        let _guard = self.lock.lock().await;

        let contents = self.read_contents().await?;
        let count = parse_lines(&contents).len();

        let mut line = String::with_capacity(entry.len() + 2);
        if !contents.is_empty() && !contents.ends_with('\n') {
            line.push('\n');
        }
        line.push_str(&entry);
        line.push('\n');

        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;

        debug!(path = %self.path.display(), "pending entry appended");
        Ok(PendingItem {
            id: (count + 1).to_string(),
            url: entry,
        })
    }

    async fn list(&self) -> StoreResult<Vec<PendingItem>> {
        let _guard = self.lock.lock().await;
        let contents = self.read_contents().await?;
        Ok(parse_lines(&contents))
    }

    async fn clear(&self) -> StoreResult<usize> {
        let _guard = self.lock.lock().await;
        let contents = self.read_contents().await?;
        let removed = parse_lines(&contents).len();
        if !contents.is_empty() {
            fs::write(&self.path, b"").await?;
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StoreError;

    fn store_in(dir: &tempfile::TempDir) -> FlatFileStore {
        FlatFileStore::new(dir.path().join("todo.txt"))
    }

    #[tokio::test]
    async fn test_missing_file_is_empty() {
        let Ok(dir) = tempfile::tempdir() else { return };
        let store = store_in(&dir);
        assert_eq!(store.list().await.ok(), Some(Vec::new()));
        assert_eq!(store.clear().await.ok(), Some(0));
    }

    #[tokio::test]
    async fn test_add_then_list_in_order() {
        let Ok(dir) = tempfile::tempdir() else { return };
        let store = store_in(&dir);

        let first = store.add(" https://example.com/a ").await.ok();
        let second = store.add("dQw4w9WgXcQ").await.ok();
        assert_eq!(first.map(|i| i.id), Some("1".to_string()));
        assert_eq!(second.map(|i| i.id), Some("2".to_string()));

        let items = store.list().await.unwrap_or_default();
        let urls: Vec<&str> = items.iter().map(|i| i.url.as_str()).collect();
        assert_eq!(urls, vec!["https://example.com/a", "dQw4w9WgXcQ"]);

        let raw = std::fs::read_to_string(store.path()).unwrap_or_default();
        assert_eq!(raw, "https://example.com/a\ndQw4w9WgXcQ\n");
    }

    #[tokio::test]
    async fn test_reads_hand_edited_file() {
        let Ok(dir) = tempfile::tempdir() else { return };
        let store = store_in(&dir);
        let written = std::fs::write(store.path(), "https://a.example\n\n  https://b.example  ");
        assert!(written.is_ok());

        let items = store.list().await.unwrap_or_default();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].url, "https://b.example");

        // Appending after a line without trailing newline keeps entries apart.
        let added = store.add("https://c.example").await.ok();
        assert_eq!(added.map(|i| i.id), Some("3".to_string()));
        let items = store.list().await.unwrap_or_default();
        assert_eq!(items[2].url, "https://c.example");
    }

    #[tokio::test]
    async fn test_clear_returns_removed_count() {
        let Ok(dir) = tempfile::tempdir() else { return };
        let store = store_in(&dir);
        let _ = store.add("https://a.example").await;
        let _ = store.add("https://b.example").await;

        assert_eq!(store.clear().await.ok(), Some(2));
        assert_eq!(store.list().await.ok(), Some(Vec::new()));
    }

    #[tokio::test]
    async fn test_rejects_blank_entry() {
        let Ok(dir) = tempfile::tempdir() else { return };
        let store = store_in(&dir);
        assert!(matches!(store.add("   ").await, Err(StoreError::EmptyUrl)));
        assert!(!store.path().exists());
    }
}
