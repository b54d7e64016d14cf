//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.menagerie/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{LevelFilter, debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::core::screen::ScreenId;
use crate::gateway::DEFAULT_BASE_URL;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct MenagerieConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub log_level: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ApiConfig {
    pub base_url: Option<String>,
    /// Per-request timeout; 0 disables it.
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct UiConfig {
    pub health_interval_secs: Option<u64>,
    pub start_screen: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_HEALTH_INTERVAL_SECS: u64 = 5;
pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Info;

pub const ENV_API_URL: &str = "MENAGERIE_API_URL";
pub const ENV_LOG_LEVEL: &str = "MENAGERIE_LOG_LEVEL";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub base_url: String,
    pub timeout: Option<Duration>,
    pub health_interval: Duration,
    pub start_screen: ScreenId,
    pub log_level: LevelFilter,
}

/// Command-line overrides; `None` means the flag was not given.
#[derive(Debug, Clone, Copy, Default)]
pub struct CliOverrides<'a> {
    pub api_url: Option<&'a str>,
    pub start_screen: Option<ScreenId>,
    pub log_level: Option<LevelFilter>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.menagerie/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".menagerie").join("config.toml"))
}

/// Load config from `~/.menagerie/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `MenagerieConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<MenagerieConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(MenagerieConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(MenagerieConfig::default());
    }

    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<MenagerieConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config: MenagerieConfig = toml::from_str(&contents)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

const DEFAULT_CONFIG: &str = r#"# Menagerie Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# log_level = "info"                 # Or set MENAGERIE_LOG_LEVEL

# [api]
# base_url = "http://localhost:8080" # Or set MENAGERIE_API_URL / --api-url
# timeout_secs = 10                  # 0 disables the timeout

# [ui]
# health_interval_secs = 5           # About screen API status refresh
# start_screen = "about"             # Any screen tag, e.g. "list-keepers"
"#;

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, DEFAULT_CONFIG) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &MenagerieConfig, cli: CliOverrides<'_>) -> ResolvedConfig {
    resolve_with(config, |key| std::env::var(key).ok(), cli)
}

/// [`resolve`] with the environment supplied by the caller.
pub fn resolve_with(
    config: &MenagerieConfig,
    env: impl Fn(&str) -> Option<String>,
    cli: CliOverrides<'_>,
) -> ResolvedConfig {
    // Base URL: CLI → env → config → default
    let base_url = cli
        .api_url
        .map(str::to_string)
        .or_else(|| env(ENV_API_URL))
        .or_else(|| config.api.base_url.clone())
        .filter(|url| !url.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    let timeout = match config.api.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS) {
        0 => None,
        secs => Some(Duration::from_secs(secs)),
    };

    let health_interval = Duration::from_secs(
        config
            .ui
            .health_interval_secs
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_HEALTH_INTERVAL_SECS),
    );

    // Start screen: CLI → config → About. Screens that need a selection
    // cannot be started on.
    let start_screen = cli
        .start_screen
        .or_else(|| {
            config.ui.start_screen.as_deref().and_then(|tag| {
                tag.parse::<ScreenId>()
                    .map_err(|e| warn!("Ignoring start_screen: {e}"))
                    .ok()
            })
        })
        .filter(|screen| screen.required_selection().is_none())
        .unwrap_or(ScreenId::FALLBACK);

    // Log level: CLI → env → config → default
    let log_level = cli
        .log_level
        .or_else(|| {
            env(ENV_LOG_LEVEL)
                .or_else(|| config.general.log_level.clone())
                .and_then(|level| level.parse::<LevelFilter>().ok())
        })
        .unwrap_or(DEFAULT_LOG_LEVEL);

    ResolvedConfig {
        base_url,
        timeout,
        health_interval,
        start_screen,
        log_level,
    }
}
