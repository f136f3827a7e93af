//! Session marker: when this session started observing downloads.
//!
//! Downloads seen within the grace window after session start are left alone so
//! that downloads restored by the browser from a previous session are not
//! hijacked.

use async_trait::async_trait;
use std::sync::Mutex;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Milliseconds since the Unix epoch (0 if the clock is before the epoch).
pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Key-value store holding the session-start timestamp.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Session start in epoch milliseconds, if recorded.
    async fn session_start(&self) -> Option<u64>;

    async fn set_session_start(&self, millis: u64);

    /// Forget the marker (session ended).
    async fn clear(&self);
}

/// In-process session store.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    start: Mutex<Option<u64>>,
}

impl MemorySessionStore {
    /// Empty store; the marker is created on the first observed download.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with the current time (session starts with the process).
    pub fn started_now() -> Self {
        Self::started_at(now_millis())
    }

    pub fn started_at(millis: u64) -> Self {
        Self {
            start: Mutex::new(Some(millis)),
        }
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, Option<u64>> {
        self.start.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn session_start(&self) -> Option<u64> {
        *self.slot()
    }

    async fn set_session_start(&self, millis: u64) {
        *self.slot() = Some(millis);
    }

    async fn clear(&self) {
        *self.slot() = None;
    }
}

/// Reads (or creates) the session start and answers "are we still in the grace window?".
///
/// Two events racing at session start may both record a fresh timestamp; that
/// only shifts the window boundary by one event tick.
pub async fn in_grace_window(store: &dyn SessionStore, grace: Duration) -> bool {
    let now = now_millis();
    let start = match store.session_start().await {
        Some(start) => start,
        None => {
            store.set_session_start(now).await;
            now
        }
    };
    u128::from(now.saturating_sub(start)) < grace.as_millis()
}
