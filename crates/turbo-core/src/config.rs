use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default loopback host of the companion downloader.
pub const DEFAULT_COMPANION_HOST: &str = "localhost";
/// Default port the companion downloader listens on.
pub const DEFAULT_COMPANION_PORT: u16 = 5555;
/// Default startup grace window in milliseconds.
pub const DEFAULT_GRACE_WINDOW_MS: u64 = 2000;

/// Where and how to reach the companion downloader (`[companion]` in config.toml).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanionConfig {
    /// Host of the `/add` endpoint. Expected to be a loopback name or address.
    pub host: String,
    /// Port of the `/add` endpoint.
    pub port: u16,
    /// If true, an HTTP error status (>= 400) counts as a failed handoff and the
    /// browser download is resumed. Off by default: any response is success.
    pub fail_on_http_error: bool,
}

impl Default for CompanionConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_COMPANION_HOST.to_string(),
            port: DEFAULT_COMPANION_PORT,
            fail_on_http_error: false,
        }
    }
}

impl CompanionConfig {
    /// Base URL of the add endpoint, without the query string.
    pub fn add_endpoint(&self) -> String {
        format!("http://{}:{}/add", self.host, self.port)
    }
}

/// Global configuration loaded from `~/.config/turbo/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TurboConfig {
    /// Downloads observed this soon after session start are left to the browser.
    pub grace_window_ms: u64,
    /// Companion endpoint settings.
    pub companion: CompanionConfig,
}

impl Default for TurboConfig {
    fn default() -> Self {
        Self {
            grace_window_ms: DEFAULT_GRACE_WINDOW_MS,
            companion: CompanionConfig::default(),
        }
    }
}

impl TurboConfig {
    pub fn grace_window(&self) -> Duration {
        Duration::from_millis(self.grace_window_ms)
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("turbo")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<TurboConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = TurboConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    load_from(&path)
}

/// Load configuration from an explicit file. Missing keys take their defaults.
pub fn load_from(path: &Path) -> Result<TurboConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let cfg: TurboConfig =
        toml::from_str(&data).with_context(|| format!("parsing config {}", path.display()))?;
    Ok(cfg)
}
