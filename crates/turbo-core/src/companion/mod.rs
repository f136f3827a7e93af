//! Companion downloader client.
//!
//! The companion is a separate download manager listening on loopback. A
//! handoff is one `GET /add?url=...`; success means a response arrived.

mod client;
mod error;

pub use client::CurlCompanion;
pub use error::HandoffError;

use async_trait::async_trait;

/// Something that can take a URL off the browser's hands.
#[async_trait]
pub trait Companion: Send + Sync {
    async fn add(&self, url: &str) -> Result<(), HandoffError>;
}
