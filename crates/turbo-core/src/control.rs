//! Browser download control surface: pause, resume, cancel, erase.
//!
//! The browser owns each download record; this crate only issues state
//! transition requests against it by id. Implementations are best-effort and
//! callers log failures rather than acting on them.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Browser-assigned download identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DownloadId(pub i64);

impl fmt::Display for DownloadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A newly created browser download, as reported by the download-created hook.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DownloadItem {
    pub id: DownloadId,
    pub url: String,
}

impl DownloadItem {
    pub fn new(id: i64, url: impl Into<String>) -> Self {
        Self {
            id: DownloadId(id),
            url: url.into(),
        }
    }
}

/// One of the four requests the coordinator issues against a download.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlAction {
    Pause,
    Resume,
    Cancel,
    Erase,
}

impl fmt::Display for ControlAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ControlAction::Pause => "pause",
            ControlAction::Resume => "resume",
            ControlAction::Cancel => "cancel",
            ControlAction::Erase => "erase",
        };
        f.write_str(s)
    }
}

/// Error returned when a request could not be delivered to the browser.
#[derive(Debug, thiserror::Error)]
pub enum ControlError {
    /// The channel to the browser is gone.
    #[error("browser control channel: {0}")]
    Channel(String),
}

#[async_trait]
pub trait DownloadControl: Send + Sync {
    async fn pause(&self, id: DownloadId) -> Result<(), ControlError>;

    async fn resume(&self, id: DownloadId) -> Result<(), ControlError>;

    async fn cancel(&self, id: DownloadId) -> Result<(), ControlError>;

    /// Remove the download's entry from history / the download shelf.
    async fn erase(&self, id: DownloadId) -> Result<(), ControlError>;
}
