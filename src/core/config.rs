//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.newsflash/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::ViewMode;
use crate::gateway::{DEFAULT_BASE_URL, DEFAULT_PAGE_SIZE};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct NewsflashConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub news: NewsConfig,
    #[serde(default)]
    pub notifications: NotificationConfig,
    #[serde(default)]
    pub startup: StartupConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ApiConfig {
    pub base_url: Option<String>,
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct NewsConfig {
    pub page_size: Option<u32>,
    pub default_view: Option<ViewMode>,
    pub auto_refresh_secs: Option<u64>,
    pub hot_topics: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct NotificationConfig {
    pub duration_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct StartupConfig {
    pub probe_attempts: Option<u32>,
    pub probe_interval_ms: Option<u64>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_AUTO_REFRESH_SECS: u64 = 5 * 60;
pub const DEFAULT_NOTIFICATION_MS: u64 = 3000;
pub const DEFAULT_PROBE_ATTEMPTS: u32 = 3;
pub const DEFAULT_PROBE_INTERVAL_MS: u64 = 100;

pub fn default_hot_topics() -> Vec<String> {
    ["Artificial Intelligence", "Blockchain", "Metaverse", "New Energy", "Biomedicine"]
        .iter()
        .map(|topic| topic.to_string())
        .collect()
}

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

/// How hard startup tries to reach the service before going degraded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbePolicy {
    pub attempts: u32,
    pub interval: Duration,
}

impl Default for ProbePolicy {
    fn default() -> Self {
        Self {
            attempts: DEFAULT_PROBE_ATTEMPTS,
            interval: Duration::from_millis(DEFAULT_PROBE_INTERVAL_MS),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub base_url: String,
    pub request_timeout: Duration,
    pub page_size: u32,
    pub view_mode: ViewMode,
    pub auto_refresh: Duration,
    pub hot_topics: Vec<String>,
    pub notification_duration: Duration,
    pub probe: ProbePolicy,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        resolve(&NewsflashConfig::default(), &CliOverrides::default())
    }
}

/// Values given on the command line. `None` = not specified.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub base_url: Option<String>,
    pub view_mode: Option<ViewMode>,
    pub page_size: Option<u32>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.newsflash/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".newsflash").join("config.toml"))
}

/// Load config from `~/.newsflash/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `NewsflashConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<NewsflashConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(NewsflashConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(NewsflashConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config: NewsflashConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &PathBuf) {
    let default_content = r#"# Newsflash Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [api]
# base_url = "http://127.0.0.1:8000"   # Or set NEWSFLASH_API_URL env var
# request_timeout_secs = 10

# [news]
# page_size = 20
# default_view = "grid"                # "grid" or "list"
# auto_refresh_secs = 300
# hot_topics = ["Artificial Intelligence", "Blockchain"]

# [notifications]
# duration_ms = 3000

# [startup]
# probe_attempts = 3                   # Health checks before going offline
# probe_interval_ms = 100
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &NewsflashConfig, cli: &CliOverrides) -> ResolvedConfig {
    // Base URL: CLI → env → config → default
    let base_url = cli
        .base_url
        .clone()
        .or_else(|| std::env::var("NEWSFLASH_API_URL").ok())
        .or_else(|| config.api.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    let page_size = cli
        .page_size
        .or(config.news.page_size)
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .max(1);

    let view_mode = cli
        .view_mode
        .or(config.news.default_view)
        .unwrap_or_default();

    let probe = ProbePolicy {
        attempts: config
            .startup
            .probe_attempts
            .unwrap_or(DEFAULT_PROBE_ATTEMPTS)
            .max(1),
        interval: Duration::from_millis(
            config
                .startup
                .probe_interval_ms
                .unwrap_or(DEFAULT_PROBE_INTERVAL_MS),
        ),
    };

    ResolvedConfig {
        base_url,
        request_timeout: Duration::from_secs(
            config
                .api
                .request_timeout_secs
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        ),
        page_size,
        view_mode,
        auto_refresh: Duration::from_secs(
            config
                .news
                .auto_refresh_secs
                .unwrap_or(DEFAULT_AUTO_REFRESH_SECS),
        ),
        hot_topics: config
            .news
            .hot_topics
            .clone()
            .unwrap_or_else(default_hot_topics),
        notification_duration: Duration::from_millis(
            config
                .notifications
                .duration_ms
                .unwrap_or(DEFAULT_NOTIFICATION_MS),
        ),
        probe,
    }
}
