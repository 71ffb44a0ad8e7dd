//! Binary entrypoint that serves the curator HTTP API.

use std::process::ExitCode;

use newsletter_curator::start_newsletter_curator;

fn main() -> ExitCode {
    start_newsletter_curator::run()
}
