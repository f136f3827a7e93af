//! Handoff coordinator: one decision procedure per browser download.
//!
//! Per download: grace check → scheme + admission filter → pause → handoff →
//! cancel and erase on success, resume on failure. Each download is handled on
//! its own task and touches only its own id, so nothing here is locked.

use crate::admission;
use crate::companion::{Companion, HandoffError};
use crate::control::{ControlAction, ControlError, DownloadControl, DownloadId, DownloadItem};
use crate::menu::MenuClick;
use crate::session::{self, SessionStore};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Why a download was left to the browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Observed within the startup grace window (possible session restore).
    GraceWindow,
    /// Not an `http`/`https` URL (blob:, data:, file:, ...).
    UnsupportedScheme,
    /// Extension not in the allow-set.
    NotAdmitted,
}

/// Terminal state of one download. No further action follows any of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandoffOutcome {
    /// Browser handles the download normally; nothing was requested.
    Ignored(IgnoreReason),
    /// Companion accepted it; the browser download was canceled and erased.
    HandedOff,
    /// Companion unreachable; the browser download was resumed.
    Resumed,
}

impl fmt::Display for HandoffOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandoffOutcome::Ignored(reason) => {
                let why = match reason {
                    IgnoreReason::GraceWindow => "grace window",
                    IgnoreReason::UnsupportedScheme => "unsupported scheme",
                    IgnoreReason::NotAdmitted => "not admitted",
                };
                write!(f, "ignored ({})", why)
            }
            HandoffOutcome::HandedOff => write!(f, "handed off"),
            HandoffOutcome::Resumed => write!(f, "resumed in browser"),
        }
    }
}

/// Shared handles for handling download events. Cheap to clone into tasks.
#[derive(Clone)]
pub struct HandoffCoordinator {
    companion: Arc<dyn Companion>,
    control: Arc<dyn DownloadControl>,
    session: Arc<dyn SessionStore>,
    grace_window: Duration,
}

impl HandoffCoordinator {
    pub fn new(
        companion: Arc<dyn Companion>,
        control: Arc<dyn DownloadControl>,
        session: Arc<dyn SessionStore>,
        grace_window: Duration,
    ) -> Self {
        Self {
            companion,
            control,
            session,
            grace_window,
        }
    }

    /// Handles one download-created event to completion. Call once per id.
    pub async fn on_download_created(&self, item: &DownloadItem) -> HandoffOutcome {
        let id = item.id;
        if session::in_grace_window(self.session.as_ref(), self.grace_window).await {
            tracing::debug!(download_id = %id, "within startup grace window; leaving to browser");
            return HandoffOutcome::Ignored(IgnoreReason::GraceWindow);
        }
        if !admission::is_http_url(&item.url) {
            return HandoffOutcome::Ignored(IgnoreReason::UnsupportedScheme);
        }
        if !admission::is_admitted(&item.url) {
            return HandoffOutcome::Ignored(IgnoreReason::NotAdmitted);
        }

        // Pause before the network call so the browser stops spending bandwidth.
        self.request(ControlAction::Pause, id).await;

        match self.companion.add(&item.url).await {
            Ok(()) => {
                self.request(ControlAction::Cancel, id).await;
                self.request(ControlAction::Erase, id).await;
                tracing::info!(download_id = %id, url = %item.url, "handed off to companion");
                HandoffOutcome::HandedOff
            }
            Err(e) if e.is_connection_refused() => {
                tracing::info!(download_id = %id, "companion not running, resuming in browser");
                self.request(ControlAction::Resume, id).await;
                HandoffOutcome::Resumed
            }
            Err(e) => {
                tracing::warn!(download_id = %id, "handoff failed, resuming in browser: {}", e);
                self.request(ControlAction::Resume, id).await;
                HandoffOutcome::Resumed
            }
        }
    }

    /// Spawns [`on_download_created`](Self::on_download_created) on its own task
    /// so a slow companion never holds up other downloads.
    pub fn dispatch(&self, item: DownloadItem) -> JoinHandle<HandoffOutcome> {
        let coordinator = self.clone();
        tokio::spawn(async move { coordinator.on_download_created(&item).await })
    }

    /// Context-menu path: hand a link straight to the companion. No browser
    /// download exists yet, so there is nothing to pause or resume.
    pub async fn send_link(&self, url: &str) -> Result<(), HandoffError> {
        match self.companion.add(url).await {
            Ok(()) => {
                tracing::info!(url, "link sent to companion");
                Ok(())
            }
            Err(e) if e.is_connection_refused() => {
                tracing::warn!(url, "link not sent: companion not running");
                Err(e)
            }
            Err(e) => {
                tracing::warn!(url, "link handoff failed: {}", e);
                Err(e)
            }
        }
    }

    /// Handles a context-menu click. `None` if the click is not for our entry.
    pub async fn on_menu_clicked(&self, click: &MenuClick) -> Option<Result<(), HandoffError>> {
        let url = click.turbo_link()?;
        Some(self.send_link(url).await)
    }

    /// Best-effort browser request: failures are logged, never acted on.
    async fn request(&self, action: ControlAction, id: DownloadId) {
        let result: Result<(), ControlError> = match action {
            ControlAction::Pause => self.control.pause(id).await,
            ControlAction::Resume => self.control.resume(id).await,
            ControlAction::Cancel => self.control.cancel(id).await,
            ControlAction::Erase => self.control.erase(id).await,
        };
        if let Err(e) = result {
            tracing::warn!(download_id = %id, %action, "browser request failed: {}", e);
        }
    }
}
