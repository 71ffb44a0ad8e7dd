//! The digest job: load every pending item, summarize it, mail the digest.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::{AppConfig, StoreBackend};
use crate::delivery::{
    DeliveryError, Digest, EntryOutcome, Mailer, OutgoingMail, SmtpMailer, SummaryArchive,
};
use crate::llm::{LlmError, OpenAiClient, PromptTemplate};
use crate::scraping::document::list_documents;
use crate::scraping::{ContentLoader, DocumentLoader, ScrapingError, Source};
use crate::store::{AirtableStore, FlatFileStore, PendingStore, StoreError};
use crate::summarization::{SummarizeError, WindowedSummarizer};

/// Errors that stop a digest run or prevent building one.
#[derive(Debug, Error)]
pub enum RunError {
    /// Pending items could not be read.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    /// The digest could not be sent or archived.
    #[error("delivery error: {0}")]
    Delivery(#[from] DeliveryError),
    /// The completion client could not be built.
    #[error("llm setup error: {0}")]
    Llm(#[from] LlmError),
    /// The content loader could not be built, or the documents directory
    /// could not be listed.
    #[error("content loading error: {0}")]
    Loader(#[from] ScrapingError),
    /// The summarizer rejected its settings.
    #[error("summarizer setup error: {0}")]
    Summarizer(#[from] SummarizeError),
}

/// What a run did.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RunOutcome {
    /// Nothing was queued; nothing was sent.
    NothingPending,
    /// A digest was sent.
    Sent {
        /// Items summarized.
        summarized: usize,
        /// Items that failed and were reported in the digest.
        failed: usize,
    },
}

/// Runs the digest job against its collaborators.
pub struct DigestRunner {
    store: Arc<dyn PendingStore>,
    loader: Arc<dyn DocumentLoader>,
    summarizer: WindowedSummarizer,
    mailer: Arc<dyn Mailer>,
    archive: Option<SummaryArchive>,
    documents_dir: Option<PathBuf>,
}

impl DigestRunner {
    /// Assemble a runner from explicit collaborators.
    #[must_use]
    pub fn new(
        store: Arc<dyn PendingStore>,
        loader: Arc<dyn DocumentLoader>,
        summarizer: WindowedSummarizer,
        mailer: Arc<dyn Mailer>,
    ) -> Self {
        Self {
            store,
            loader,
            summarizer,
            mailer,
            archive: None,
            documents_dir: None,
        }
    }

    /// Also append every summary to `archive`.
    #[must_use]
    pub fn with_archive(mut self, archive: SummaryArchive) -> Self {
        self.archive = Some(archive);
        self
    }

    /// Also summarize the documents found in `dir`, after the queued URLs.
    #[must_use]
    pub fn with_documents_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.documents_dir = Some(dir.into());
        self
    }

    /// Build the production runner described by `config`.
    ///
    /// # Errors
    /// Returns an error if any collaborator rejects its settings.
    pub fn from_config(config: &AppConfig) -> Result<Self, RunError> {
        let store = build_store(config)?;
        let loader = Arc::new(ContentLoader::new(config.loader.clone())?);
        let generator = Arc::new(OpenAiClient::new(
            config.api_key.as_str(),
            config.model.as_str(),
            config.llm_base_url.as_str(),
        )?);
        let summarizer = WindowedSummarizer::new(generator, PromptTemplate::default(), config.window)?;
        let mailer = Arc::new(SmtpMailer::new(
            &config.relay_host,
            config.relay_port,
            config.relay_token.as_deref(),
            &config.sender,
            &config.receiver,
        )?);

        let mut runner = Self::new(store, loader, summarizer, mailer);
        if let Some(path) = &config.archive_path {
            runner = runner.with_archive(SummaryArchive::new(path));
        }
        if let Some(dir) = &config.documents_dir {
            runner = runner.with_documents_dir(dir);
        }
        Ok(runner)
    }

    /// Pending-item store used by this runner.
    #[must_use]
    pub fn store(&self) -> Arc<dyn PendingStore> {
        Arc::clone(&self.store)
    }

    /// Summarize every pending item, then every local document, and mail
    /// the digest dated `date`.
    ///
    /// URLs are listed as submitted; documents are numbered after them as
    /// `Document {n}`. A failing item is reported inside the digest and does
    /// not stop the others. Store, listing and mail failures abort the run.
    ///
    /// # Errors
    /// Returns an error if the store or documents directory cannot be read,
    /// or the digest cannot be delivered.
    pub async fn run(&self, date: NaiveDate) -> Result<RunOutcome, RunError> {
        let items = self.store.list().await?;
        let documents = match &self.documents_dir {
            Some(dir) => list_documents(dir).await?,
            None => Vec::new(),
        };
        if items.is_empty() && documents.is_empty() {
            info!("nothing pending, skipping digest");
            return Ok(RunOutcome::NothingPending);
        }

        info!(items = items.len(), documents = documents.len(), "digest run started");
        let mut digest = Digest::new();

        for item in &items {
            let outcome = match Source::classify(&item.url) {
                Ok(source) => self.summarize_source(&source).await,
                Err(e) => Err(e.to_string()),
            };
            self.record(&mut digest, item.url.clone(), outcome).await?;
        }

        for (n, path) in documents.into_iter().enumerate() {
            let outcome = self.summarize_source(&Source::File { path }).await;
            self.record(&mut digest, format!("Document {}", n + 1), outcome)
                .await?;
        }

        let mail = OutgoingMail {
            subject: Digest::subject(date),
            body: digest.render(),
        };
        self.mailer.send(&mail).await?;

        let outcome = RunOutcome::Sent {
            summarized: digest.summarized_count(),
            failed: digest.failed_count(),
        };
        info!(?outcome, "digest run finished");
        Ok(outcome)
    }

    /// Add one entry, archiving the summary when an archive is configured.
    async fn record(
        &self,
        digest: &mut Digest,
        label: String,
        outcome: Result<String, String>,
    ) -> Result<(), RunError> {
        match outcome {
            Ok(summary) => {
                if let Some(archive) = &self.archive {
                    archive.append(&summary).await?;
                }
                digest.push(label, EntryOutcome::Summarized(summary));
            }
            Err(reason) => {
                warn!(source = %label, %reason, "item could not be summarized");
                digest.push(label, EntryOutcome::Failed(reason));
            }
        }
        Ok(())
    }

    /// Load and summarize one source; the error is the human-readable reason.
    async fn summarize_source(&self, source: &Source) -> Result<String, String> {
        let document = self.loader.load(source).await.map_err(|e| e.to_string())?;
        self.summarizer
            .summarize(&document.text)
            .await
            .map_err(|e| e.to_string())
    }
}

/// Build the store selected by `config`.
///
/// # Errors
/// Returns an error if the Airtable settings are unusable.
pub fn build_store(config: &AppConfig) -> Result<Arc<dyn PendingStore>, RunError> {
    let store: Arc<dyn PendingStore> = match &config.store {
        StoreBackend::File { path } => Arc::new(FlatFileStore::new(path)),
        StoreBackend::Airtable {
            api_key,
            base_id,
            table,
        } => Arc::new(AirtableStore::new(
            api_key.as_str(),
            base_id.as_str(),
            table.as_str(),
        )?),
    };
    Ok(store)
}
