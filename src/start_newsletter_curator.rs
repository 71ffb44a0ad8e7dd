//! Startup helpers for the newsletter curator binaries.

use std::process::ExitCode;

use crate::config::{AppConfig, StoreBackend};
use crate::runner::{DigestRunner, RunOutcome};
use crate::server::{self, AppState};

/// Install the global tracing subscriber. `RUST_LOG` refines the default
/// `info` level.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();
}

fn load() -> Option<(AppConfig, DigestRunner)> {
    let config = match AppConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("Invalid configuration: {e}");
            return None;
        }
    };

    match DigestRunner::from_config(&config) {
        Ok(runner) => Some((config, runner)),
        Err(e) => {
            tracing::error!("Failed to build digest runner: {e}");
            None
        }
    }
}

fn runtime() -> Option<tokio::runtime::Runtime> {
    match tokio::runtime::Runtime::new() {
        Ok(rt) => Some(rt),
        Err(e) => {
            tracing::error!("Failed to create runtime: {e}");
            None
        }
    }
}

/// Run the HTTP server until Ctrl-C.
///
/// # Returns
/// `ExitCode::SUCCESS` on graceful shutdown, `1` on failure.
#[must_use]
pub fn run() -> ExitCode {
    init_tracing();
    tracing::info!("Starting newsletter curator v{}", env!("CARGO_PKG_VERSION"));

    let Some((config, runner)) = load() else {
        return ExitCode::from(1);
    };
    if config.access_key.is_none() {
        tracing::warn!("CURATOR_ACCESS_KEY is not set, /api routes will refuse every request");
    }
    let backend = match &config.store {
        StoreBackend::File { .. } => "file",
        StoreBackend::Airtable { .. } => "airtable",
    };
    tracing::info!(model = %config.model, backend, "configuration loaded");

    let state = AppState::new(runner, config.access_key.clone());
    let Some(rt) = runtime() else {
        return ExitCode::from(1);
    };

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for shutdown signal: {e}");
        }
        tracing::info!("Shutdown requested");
    };

    if let Err(e) = rt.block_on(server::run_server_with_shutdown(state, config.port, shutdown)) {
        tracing::error!("Server error: {e}");
        return ExitCode::from(1);
    }

    ExitCode::SUCCESS
}

/// Run the digest job once for today's date and exit.
///
/// # Returns
/// `ExitCode::SUCCESS` when the run completes, `1` on failure.
#[must_use]
pub fn run_digest_once() -> ExitCode {
    init_tracing();

    let Some((_, runner)) = load() else {
        return ExitCode::from(1);
    };
    let Some(rt) = runtime() else {
        return ExitCode::from(1);
    };

    let today = chrono::Local::now().date_naive();
    match rt.block_on(runner.run(today)) {
        Ok(RunOutcome::NothingPending) => {
            tracing::info!("Nothing pending for {today}");
            ExitCode::SUCCESS
        }
        Ok(RunOutcome::Sent { summarized, failed }) => {
            tracing::info!(summarized, failed, "Digest for {today} sent");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("Digest run failed: {e}");
            ExitCode::from(1)
        }
    }
}
