//! Newsletter curator: summarize queued articles and videos into a daily
//! email digest.
//!
//! Long documents are split into overlapping word windows, each window is
//! summarized by a hosted chat model, and the partial summaries are joined
//! back together with the overlap trimmed.

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(unused_must_use)]
#![deny(nonstandard_style)]
#![forbid(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::print_stdout)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
#![deny(clippy::unwrap_in_result)]
#![deny(clippy::redundant_clone)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]
#![deny(overflowing_literals)]

/// Runtime configuration.
pub mod config;
/// Digest formatting, mail delivery and the summary archive.
pub mod delivery;
/// Text-generation backends.
pub mod llm;
/// The digest job.
pub mod runner;
/// Content loading for web pages and YouTube transcripts.
#[allow(
    clippy::doc_markdown,
    clippy::cast_possible_truncation,
    clippy::missing_errors_doc
)]
pub mod scraping;
/// HTTP server and API routes.
#[allow(clippy::missing_errors_doc, clippy::unused_async)]
pub mod server;
/// Entry helpers for the binaries.
pub mod start_newsletter_curator;
/// Pending-item stores.
pub mod store;
/// Windowed summarization of long documents.
pub mod summarization;
/// Window splitting and summary combining.
pub mod windowing;
