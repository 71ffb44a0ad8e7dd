//! Application state shared across all request handlers.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::runner::DigestRunner;
use crate::store::PendingStore;

/// Shared application state.
pub struct AppState {
    /// Digest job.
    pub runner: DigestRunner,
    /// Pending-item store, shared with the runner.
    pub store: Arc<dyn PendingStore>,
    /// Secret expected in the `x-access-key` header.
    pub access_key: Option<String>,
    /// Held while a digest run is in progress.
    pub run_lock: Mutex<()>,
}

impl AppState {
    /// Create a new application state around `runner`.
    #[must_use]
    pub fn new(runner: DigestRunner, access_key: Option<String>) -> Arc<Self> {
        let store = runner.store();
        Arc::new(Self {
            runner,
            store,
            access_key,
            run_lock: Mutex::new(()),
        })
    }
}
