//! Handoff error type.

/// Why a handoff to the companion downloader did not go through.
#[derive(Debug, thiserror::Error)]
pub enum HandoffError {
    /// Curl reported a transport error (connection refused, DNS, reset, ...).
    #[error("companion unreachable: {0}")]
    Transport(#[from] curl::Error),
    /// The companion answered with an error status and the config treats that as failure.
    #[error("companion returned HTTP {0}")]
    Http(u32),
    /// The blocking request task panicked or was cancelled.
    #[error("handoff task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl HandoffError {
    /// True for "nothing is listening" errors: the companion app is not running.
    pub fn is_connection_refused(&self) -> bool {
        match self {
            HandoffError::Transport(e) => e.is_couldnt_connect(),
            _ => false,
        }
    }
}
