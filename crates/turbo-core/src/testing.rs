//! In-memory doubles for the companion and the browser, for unit tests.
//!
//! Both doubles append to a [`StepLog`]; hand the same log to each to see the
//! order of browser requests relative to companion calls.

use crate::companion::{Companion, HandoffError};
use crate::control::{ControlAction, ControlError, DownloadControl, DownloadId};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// One observed side effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Control(ControlAction, DownloadId),
    Handoff(String),
}

/// Append-only record shared between doubles.
#[derive(Debug, Clone, Default)]
pub struct StepLog(Arc<Mutex<Vec<Step>>>);

impl StepLog {
    pub fn steps(&self) -> Vec<Step> {
        self.0.lock().unwrap().clone()
    }

    fn push(&self, step: Step) {
        self.0.lock().unwrap().push(step);
    }
}

/// Companion that records every URL and either accepts or refuses all of them.
pub struct FakeCompanion {
    reachable: bool,
    delay: Duration,
    log: StepLog,
}

impl FakeCompanion {
    pub fn accepting() -> Self {
        Self {
            reachable: true,
            delay: Duration::ZERO,
            log: StepLog::default(),
        }
    }

    pub fn refusing() -> Self {
        Self {
            reachable: false,
            ..Self::accepting()
        }
    }

    /// Answers only after `delay`, like a slow or hung companion.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_log(mut self, log: StepLog) -> Self {
        self.log = log;
        self
    }

    /// URLs whose call has completed, in order.
    pub fn received(&self) -> Vec<String> {
        self.log
            .steps()
            .into_iter()
            .filter_map(|step| match step {
                Step::Handoff(url) => Some(url),
                Step::Control(..) => None,
            })
            .collect()
    }
}

#[async_trait]
impl Companion for FakeCompanion {
    async fn add(&self, url: &str) -> Result<(), HandoffError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.log.push(Step::Handoff(url.to_string()));
        if self.reachable {
            Ok(())
        } else {
            // CURLE_COULDNT_CONNECT: nothing listening on the port.
            Err(HandoffError::Transport(curl::Error::new(7)))
        }
    }
}

/// Browser stand-in that logs every request in order.
#[derive(Default)]
pub struct RecordingControl {
    log: StepLog,
    reject: Option<ControlAction>,
}

impl RecordingControl {
    /// Fails every request of `action` (still recorded).
    pub fn rejecting(action: ControlAction) -> Self {
        Self {
            reject: Some(action),
            ..Self::default()
        }
    }

    pub fn with_log(mut self, log: StepLog) -> Self {
        self.log = log;
        self
    }

    pub fn calls(&self) -> Vec<(ControlAction, DownloadId)> {
        self.log
            .steps()
            .into_iter()
            .filter_map(|step| match step {
                Step::Control(action, id) => Some((action, id)),
                Step::Handoff(_) => None,
            })
            .collect()
    }

    fn record(&self, action: ControlAction, id: DownloadId) -> Result<(), ControlError> {
        self.log.push(Step::Control(action, id));
        if self.reject == Some(action) {
            return Err(ControlError::Channel(format!("test rejection of {action} for {id}")));
        }
        Ok(())
    }
}

#[async_trait]
impl DownloadControl for RecordingControl {
    async fn pause(&self, id: DownloadId) -> Result<(), ControlError> {
        self.record(ControlAction::Pause, id)
    }

    async fn resume(&self, id: DownloadId) -> Result<(), ControlError> {
        self.record(ControlAction::Resume, id)
    }

    async fn cancel(&self, id: DownloadId) -> Result<(), ControlError> {
        self.record(ControlAction::Cancel, id)
    }

    async fn erase(&self, id: DownloadId) -> Result<(), ControlError> {
        self.record(ControlAction::Erase, id)
    }
}
