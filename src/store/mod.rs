//! Storage for URLs waiting to be summarized.
//!
//! Two interchangeable backends sit behind [`PendingStore`]: a local flat
//! file with one entry per line, and an Airtable table with a `URL` field.

pub mod airtable;
pub mod error;
pub mod flat_file;

pub use airtable::AirtableStore;
pub use error::{StoreError, StoreResult};
pub use flat_file::FlatFileStore;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// One pending entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingItem {
    /// Backend-specific identifier.
    pub id: String,
    /// Submitted URL or video identifier.
    pub url: String,
}

/// Backend holding the entries for the next digest.
#[async_trait]
pub trait PendingStore: Send + Sync {
    /// Append an entry and return it as stored.
    async fn add(&self, url: &str) -> StoreResult<PendingItem>;
    /// List entries in submission order.
    async fn list(&self) -> StoreResult<Vec<PendingItem>>;
    /// Remove every entry and return how many were removed.
    async fn clear(&self) -> StoreResult<usize>;
}

/// Trim a submitted entry and reject values that cannot be stored.
///
/// # Errors
/// Returns [`StoreError::EmptyUrl`] for blank input and
/// [`StoreError::InvalidEntry`] for input spanning several lines.
pub fn normalize_entry(raw: &str) -> StoreResult<String> {
    let entry = raw.trim();
    if entry.is_empty() {
        return Err(StoreError::EmptyUrl);
    }
    if entry.contains(['\n', '\r']) {
        return Err(StoreError::InvalidEntry(
            "entry must fit on one line".to_string(),
        ));
    }
    Ok(entry.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_entry_trims() {
        assert_eq!(
            normalize_entry("  https://example.com/a \n").ok(),
            Some("https://example.com/a".to_string())
        );
    }

    #[test]
    fn test_normalize_entry_rejects_blank() {
        assert!(matches!(normalize_entry(" \t"), Err(StoreError::EmptyUrl)));
    }

    #[test]
    fn test_normalize_entry_rejects_multiline() {
        assert!(matches!(
            normalize_entry("https://a.example\nhttps://b.example"),
            Err(StoreError::InvalidEntry(_))
        ));
    }
}
