//! libcurl client for the companion's `/add` endpoint.

use super::{Companion, HandoffError};
use crate::config::CompanionConfig;
use async_trait::async_trait;

/// Sends handoff requests to a companion listening on loopback.
///
/// One GET per call, no retries, no timeout override (libcurl defaults).
#[derive(Debug, Clone)]
pub struct CurlCompanion {
    endpoint: String,
    fail_on_http_error: bool,
}

impl CurlCompanion {
    pub fn new(config: &CompanionConfig) -> Self {
        Self {
            endpoint: config.add_endpoint(),
            fail_on_http_error: config.fail_on_http_error,
        }
    }

    /// Full request URL: `<endpoint>?url=<percent-encoded url>`.
    pub fn request_url(&self, url: &str) -> String {
        let encoded = curl::easy::Easy::new().url_encode(url.as_bytes());
        format!("{}?url={}", self.endpoint, encoded)
    }

    /// Performs the GET on the current thread and returns the HTTP status.
    /// Call from `spawn_blocking` when used from async code.
    fn add_blocking(request_url: &str) -> Result<u32, curl::Error> {
        let mut easy = curl::easy::Easy::new();
        easy.url(request_url)?;
        easy.get(true)?;
        {
            let mut transfer = easy.transfer();
            // No body contract; drain whatever the companion sends.
            transfer.write_function(|data| Ok(data.len()))?;
            transfer.perform()?;
        }
        easy.response_code()
    }
}

#[async_trait]
impl Companion for CurlCompanion {
    async fn add(&self, url: &str) -> Result<(), HandoffError> {
        let request_url = self.request_url(url);
        tracing::debug!(request = %request_url, "sending handoff");
        let code =
            tokio::task::spawn_blocking(move || Self::add_blocking(&request_url)).await??;
        if code >= 400 {
            if self.fail_on_http_error {
                return Err(HandoffError::Http(code));
            }
            tracing::warn!(
                status = code,
                url,
                "companion answered with an error status; treating as accepted"
            );
        }
        Ok(())
    }
}
