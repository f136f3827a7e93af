//! `turbo host` – run the browser bridge on stdin/stdout until stdin closes.

use anyhow::Result;
use std::sync::Arc;
use tokio::io::BufReader;
use turbo_core::bridge;
use turbo_core::companion::CurlCompanion;
use turbo_core::config::TurboConfig;
use turbo_core::session::MemorySessionStore;

pub async fn run_host(cfg: &TurboConfig) -> Result<()> {
    let companion = Arc::new(CurlCompanion::new(&cfg.companion));
    // Long-running process: the session starts now, not at the first download.
    let session = Arc::new(MemorySessionStore::started_now());
    tracing::info!(
        endpoint = %cfg.companion.add_endpoint(),
        grace_ms = cfg.grace_window_ms,
        "host bridge started"
    );

    let summary = bridge::run_host(
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
        companion,
        session,
        cfg.grace_window(),
    )
    .await?;

    tracing::info!(
        handed_off = summary.handed_off,
        resumed = summary.resumed,
        ignored = summary.ignored,
        "host bridge stopped"
    );
    Ok(())
}
