//! Line protocol between the browser extension shell and the host.
//!
//! One JSON object per line in each direction. Inbound lines carry a `type`
//! tag, outbound lines a `command` tag.

use crate::control::{ControlAction, DownloadId, DownloadItem};
use crate::menu::{ContextMenuItem, MenuClick};
use serde::{Deserialize, Serialize};

/// Event forwarded from the browser.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HostEvent {
    /// Extension installed or updated: register the context menu.
    Installed,
    DownloadCreated(DownloadItem),
    MenuClicked(MenuClick),
}

/// Request for the browser to carry out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum BrowserCommand {
    Pause { id: DownloadId },
    Resume { id: DownloadId },
    Cancel { id: DownloadId },
    Erase { id: DownloadId },
    CreateMenu(ContextMenuItem),
}

impl BrowserCommand {
    pub fn for_action(action: ControlAction, id: DownloadId) -> Self {
        match action {
            ControlAction::Pause => BrowserCommand::Pause { id },
            ControlAction::Resume => BrowserCommand::Resume { id },
            ControlAction::Cancel => BrowserCommand::Cancel { id },
            ControlAction::Erase => BrowserCommand::Erase { id },
        }
    }
}

/// Parses one inbound line. `Ok(None)` for blank lines.
pub fn parse_event(line: &str) -> Result<Option<HostEvent>, serde_json::Error> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    serde_json::from_str(line).map(Some)
}
