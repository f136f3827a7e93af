//! Outbound side of the bridge: browser commands as JSON lines.

use super::protocol::BrowserCommand;
use super::BridgeError;
use crate::control::{ControlAction, ControlError, DownloadControl, DownloadId};
use async_trait::async_trait;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::Mutex;

/// Serializes commands onto a shared writer, one line each. Lines from
/// concurrent download tasks never interleave.
pub struct CommandWriter<W> {
    out: Mutex<W>,
}

impl<W: AsyncWrite + Unpin + Send> CommandWriter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub async fn send(&self, command: &BrowserCommand) -> Result<(), BridgeError> {
        let mut line = serde_json::to_vec(command)?;
        line.push(b'\n');
        let mut out = self.out.lock().await;
        out.write_all(&line).await?;
        out.flush().await?;
        Ok(())
    }

    async fn send_action(&self, action: ControlAction, id: DownloadId) -> Result<(), ControlError> {
        self.send(&BrowserCommand::for_action(action, id))
            .await
            .map_err(|e| ControlError::Channel(e.to_string()))
    }
}

#[async_trait]
impl<W: AsyncWrite + Unpin + Send> DownloadControl for CommandWriter<W> {
    async fn pause(&self, id: DownloadId) -> Result<(), ControlError> {
        self.send_action(ControlAction::Pause, id).await
    }

    async fn resume(&self, id: DownloadId) -> Result<(), ControlError> {
        self.send_action(ControlAction::Resume, id).await
    }

    async fn cancel(&self, id: DownloadId) -> Result<(), ControlError> {
        self.send_action(ControlAction::Cancel, id).await
    }

    async fn erase(&self, id: DownloadId) -> Result<(), ControlError> {
        self.send_action(ControlAction::Erase, id).await
    }
}
