//! "Download with Turbo" context-menu entry on links.

use serde::{Deserialize, Serialize};

pub const MENU_ITEM_ID: &str = "turboDownload";
pub const MENU_ITEM_TITLE: &str = "Download with Turbo";

/// Where the browser shows a menu entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MenuContext {
    Link,
}

/// Menu entry registration, sent to the browser once at install.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContextMenuItem {
    pub id: String,
    pub title: String,
    pub contexts: Vec<MenuContext>,
}

impl ContextMenuItem {
    /// The single entry this crate registers: visible only on hyperlinks.
    pub fn turbo_download() -> Self {
        Self {
            id: MENU_ITEM_ID.to_string(),
            title: MENU_ITEM_TITLE.to_string(),
            contexts: vec![MenuContext::Link],
        }
    }
}

/// A click on some context-menu entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MenuClick {
    #[serde(alias = "menuItemId")]
    pub menu_item_id: String,
    #[serde(default, alias = "linkUrl")]
    pub link_url: Option<String>,
}

impl MenuClick {
    /// The link to hand off, if this click is on our entry and carries a link.
    pub fn turbo_link(&self) -> Option<&str> {
        if self.menu_item_id != MENU_ITEM_ID {
            return None;
        }
        self.link_url.as_deref().filter(|u| !u.is_empty())
    }
}
