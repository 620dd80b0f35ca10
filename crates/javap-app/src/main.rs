#![forbid(unsafe_code)]
#![deny(
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]

//! Binary entrypoint that wires the javap services together and serves HTTP.

use javap_app::{AppResult, run_app};

/// Bootstraps the javap service and blocks until the listener stops.
#[tokio::main]
async fn main() -> AppResult<()> {
    run_app().await
}
