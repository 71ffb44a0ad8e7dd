//! Runs the digest job once and exits. Schedule it with cron or a timer.
//! Run with: cargo run --bin curator-digest

use std::process::ExitCode;

use newsletter_curator::start_newsletter_curator;

fn main() -> ExitCode {
    start_newsletter_curator::run_digest_once()
}
