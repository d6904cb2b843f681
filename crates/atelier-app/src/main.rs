#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]

//! Binary entrypoint that loads configuration, installs telemetry and holds
//! the application context until shutdown.

use atelier_app::{AppResult, run_app};
use tracing::info;

/// Bootstraps the Atelier application and blocks until ctrl-c.
#[tokio::main]
async fn main() -> AppResult<()> {
    let context = run_app()?;
    if tokio::signal::ctrl_c().await.is_err() {
        info!("ctrl-c handler unavailable; exiting");
    }
    let snapshot = context.metrics().snapshot();
    info!(
        listing_fetches = snapshot.listing_fetches_total,
        stale_responses = snapshot.listing_stale_responses_total,
        "Atelier shutting down"
    );
    Ok(())
}
