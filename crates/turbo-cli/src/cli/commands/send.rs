//! `turbo send <url>` – hand a URL to the companion without a browser download.

use anyhow::{Context, Result};
use turbo_core::companion::{Companion, CurlCompanion};
use turbo_core::config::TurboConfig;

pub async fn run_send(cfg: &TurboConfig, url: &str) -> Result<()> {
    let companion = CurlCompanion::new(&cfg.companion);
    companion
        .add(url)
        .await
        .with_context(|| format!("sending {url} to {}", cfg.companion.add_endpoint()))?;
    println!("Sent to Turbo: {url}");
    Ok(())
}
