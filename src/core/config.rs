//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.pulpit/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::HymnalFormat;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct PulpitConfig {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub remote: RemoteConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct DataConfig {
    pub verses_path: Option<String>,
    pub hymnal_path: Option<String>,
    pub hymnal_format: Option<HymnalFormat>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct RemoteConfig {
    pub enabled: Option<bool>,
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct DisplayConfig {
    pub translation: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_VERSES_PATH: &str = "verses-1769.json";
pub const DEFAULT_HYMNAL_PATH: &str = "SDAH.sps";
pub const DEFAULT_REMOTE_BASE_URL: &str = "https://bible-api.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_TRANSLATION: &str = "KJV";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub verses_path: PathBuf,
    pub hymnal_path: PathBuf,
    pub hymnal_format: HymnalFormat,
    pub remote_enabled: bool,
    pub remote_base_url: String,
    pub remote_timeout: Duration,
    pub translation: String,
}

/// Values that came from command-line flags (None = not specified).
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub verses_path: Option<PathBuf>,
    pub hymnal_path: Option<PathBuf>,
    pub hymnal_format: Option<HymnalFormat>,
    pub offline: bool,
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

/// Returns the path to `~/.pulpit/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".pulpit").join("config.toml"))
}

/// Load config from `~/.pulpit/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `PulpitConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<PulpitConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(PulpitConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(PulpitConfig::default());
    }

    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<PulpitConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: PulpitConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# Pulpit Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [data]
# verses_path = "verses-1769.json"   # Or PULPIT_VERSES / --verses
# hymnal_path = "SDAH.sps"           # Or PULPIT_HYMNAL / --hymnal
# hymnal_format = "auto"             # "auto", "json", "sps", "sps-flat"

# [remote]
# enabled = true                     # --offline or PULPIT_OFFLINE=1 disables
# base_url = "https://bible-api.com" # Or PULPIT_REMOTE_URL
# timeout_secs = 10

# [display]
# translation = "KJV"
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &PulpitConfig, cli: &CliOverrides) -> ResolvedConfig {
    // Data files: CLI → env → config → default
    let verses_path = cli
        .verses_path
        .clone()
        .or_else(|| std::env::var("PULPIT_VERSES").ok().map(PathBuf::from))
        .or_else(|| config.data.verses_path.clone().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_VERSES_PATH));

    let hymnal_path = cli
        .hymnal_path
        .clone()
        .or_else(|| std::env::var("PULPIT_HYMNAL").ok().map(PathBuf::from))
        .or_else(|| config.data.hymnal_path.clone().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_HYMNAL_PATH));

    let hymnal_format = cli
        .hymnal_format
        .or(config.data.hymnal_format)
        .unwrap_or_default();

    // Remote: --offline and PULPIT_OFFLINE both win over the file
    let env_offline = std::env::var("PULPIT_OFFLINE")
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false);
    let remote_enabled = !cli.offline && !env_offline && config.remote.enabled.unwrap_or(true);

    let remote_base_url = std::env::var("PULPIT_REMOTE_URL")
        .ok()
        .or_else(|| config.remote.base_url.clone())
        .unwrap_or_else(|| DEFAULT_REMOTE_BASE_URL.to_string());

    ResolvedConfig {
        verses_path,
        hymnal_path,
        hymnal_format,
        remote_enabled,
        remote_base_url,
        remote_timeout: Duration::from_secs(
            config.remote.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
        ),
        translation: config
            .display
            .translation
            .clone()
            .unwrap_or_else(|| DEFAULT_TRANSLATION.to_string()),
    }
}
