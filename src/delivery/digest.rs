//! Plain-text digest assembled from per-item summaries.

use std::fmt::Write as _;

use chrono::NaiveDate;
use serde::Serialize;

/// Result of processing one pending item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum EntryOutcome {
    /// Combined summary of the item.
    Summarized(String),
    /// Why the item could not be summarized.
    Failed(String),
}

/// One numbered digest entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DigestEntry {
    /// 1-based position in the digest.
    pub index: usize,
    /// What was summarized: the URL as submitted, or a document label.
    pub source: String,
    /// Summary or failure reason.
    pub outcome: EntryOutcome,
}

/// Ordered collection of entries for one delivery.
#[derive(Clone, Debug, Default, Serialize)]
pub struct Digest {
    entries: Vec<DigestEntry>,
}

impl Digest {
    /// Create an empty digest.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append an entry, numbering it after the existing ones.
    pub fn push(&mut self, source: impl Into<String>, outcome: EntryOutcome) {
        let index = self.entries.len() + 1;
        self.entries.push(DigestEntry {
            index,
            source: source.into(),
            outcome,
        });
    }

    /// Entries in order.
    #[must_use]
    pub fn entries(&self) -> &[DigestEntry] {
        &self.entries
    }

    /// Whether nothing was added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries that produced a summary.
    #[must_use]
    pub fn summarized_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e.outcome, EntryOutcome::Summarized(_)))
            .count()
    }

    /// Number of entries that failed.
    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.entries.len() - self.summarized_count()
    }

    /// Mail subject for a digest sent on `date`.
    #[must_use]
    pub fn subject(date: NaiveDate) -> String {
        format!("Daily Summaries - {}", date.format("%Y-%m-%d"))
    }

    /// Render the plain-text body.
    ///
    /// Each entry is `"{index}. {source}\n{summary}\n\n"`; a failed entry
    /// reads `Could not summarize: {reason}` in place of the summary.
    #[must_use]
    pub fn render(&self) -> String {
        let mut body = String::new();
        for entry in &self.entries {
            let _ = writeln!(body, "{}. {}", entry.index, entry.source);
            match &entry.outcome {
                EntryOutcome::Summarized(summary) => body.push_str(summary),
                EntryOutcome::Failed(reason) => {
                    let _ = write!(body, "Could not summarize: {reason}");
                }
            }
            body.push_str("\n\n");
        }
        body
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_numbers_entries() {
        let mut digest = Digest::new();
        digest.push(
            "https://a.example",
            EntryOutcome::Summarized("First summary.".to_string()),
        );
        digest.push(
            "https://b.example",
            EntryOutcome::Failed("HTTP status 404".to_string()),
        );
        digest.push("Document 1", EntryOutcome::Summarized("Notes.".to_string()));

        assert_eq!(
            digest.render(),
            "1. https://a.example\nFirst summary.\n\n\
             2. https://b.example\nCould not summarize: HTTP status 404\n\n\
             3. Document 1\nNotes.\n\n"
        );
        assert_eq!(digest.summarized_count(), 1);
        assert_eq!(digest.failed_count(), 1);
    }

    #[test]
    fn test_entries_serialize_without_title() {
        let mut digest = Digest::new();
        digest.push("x", EntryOutcome::Summarized("s".to_string()));
        let json = serde_json::to_value(&digest.entries()[0]).unwrap_or_default();
        assert_eq!(
            json,
            serde_json::json!({
                "index": 1,
                "source": "x",
                "outcome": {"status": "summarized", "detail": "s"}
            })
        );
    }

    #[test]
    fn test_subject_uses_iso_date() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap_or_default();
        assert_eq!(Digest::subject(date), "Daily Summaries - 2024-03-07");
    }

    #[test]
    fn test_empty_digest() {
        let digest = Digest::new();
        assert!(digest.is_empty());
        assert_eq!(digest.render(), "");
    }
}
