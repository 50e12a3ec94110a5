//! Configuration for the uidb CLI.
//!
//! TOML config file, `UIDB_*` environment overrides, translation to
//! `uidb_core::CatalogConfig`, and the file-backed preference store. Core
//! never touches disk; everything path-related lives here.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use uidb_api::{DEFAULT_FEED_URL, DEFAULT_IMAGE_SIZE, TlsMode};
use uidb_core::{CatalogConfig, Fallback, PreferenceBackend, PreferenceError};

/// Prefix for environment overrides (`UIDB_FEED_URL`, `UIDB_DEFAULTS__OUTPUT`).
pub const ENV_PREFIX: &str = "UIDB_";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to read fallback file {path}: {source}")]
    FallbackFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Config {
    /// Catalog feed URL.
    #[serde(default = "default_feed_url")]
    pub feed_url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Never contact the feed; always use the fallback snapshot.
    #[serde(default)]
    pub offline: bool,

    /// Catalog JSON used instead of the bundled snapshot.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_file: Option<PathBuf>,

    /// Extra CA certificate (PEM) to trust.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ca_cert: Option<PathBuf>,

    /// Output defaults.
    #[serde(default)]
    pub defaults: Defaults,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            feed_url: default_feed_url(),
            timeout: default_timeout(),
            offline: false,
            fallback_file: None,
            ca_cert: None,
            defaults: Defaults::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    /// Thumbnail width requested from the image service.
    #[serde(default = "default_image_size")]
    pub image_size: u32,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            image_size: default_image_size(),
        }
    }
}

fn default_feed_url() -> String {
    DEFAULT_FEED_URL.into()
}
fn default_timeout() -> u64 {
    30
}
fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_image_size() -> u32 {
    DEFAULT_IMAGE_SIZE
}

// ── Paths ───────────────────────────────────────────────────────────

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "uidb", "uidb")
}

fn home() -> PathBuf {
    PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()))
}

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    project_dirs().map_or_else(
        || home().join(".config").join("uidb").join("config.toml"),
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

/// Directory for persisted state (preferences).
pub fn data_dir() -> PathBuf {
    project_dirs().map_or_else(
        || home().join(".local").join("share").join("uidb"),
        |dirs| dirs.data_dir().to_path_buf(),
    )
}

pub fn preferences_path() -> PathBuf {
    data_dir().join("preferences.toml")
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load Config from a specific file + environment. A missing file is not
/// an error.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).split("__"));

    let config: Config = figment.extract()?;
    debug!(path = %path.display(), "config loaded");
    Ok(config)
}

/// Load config, returning a default if the file doesn't exist.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path();
    save_config_to(cfg, &path)?;
    Ok(path)
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Translation to core ─────────────────────────────────────────────

/// Build a `CatalogConfig` from the file config. Reads the fallback file
/// eagerly so a bad path fails before any network traffic.
pub fn resolve_catalog_config(cfg: &Config) -> Result<CatalogConfig, ConfigError> {
    url::Url::parse(&cfg.feed_url).map_err(|e| ConfigError::Validation {
        field: "feed_url".into(),
        reason: format!("{e}: {}", cfg.feed_url),
    })?;

    let fallback = match &cfg.fallback_file {
        Some(path) => {
            let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::FallbackFile {
                path: path.clone(),
                source,
            })?;
            Fallback::Json(raw)
        }
        None => Fallback::Bundled,
    };

    let tls = cfg
        .ca_cert
        .as_ref()
        .map_or(TlsMode::System, |p| TlsMode::CustomCa(p.clone()));

    Ok(CatalogConfig {
        feed_url: cfg.feed_url.clone(),
        timeout: Duration::from_secs(cfg.timeout),
        tls,
        offline: cfg.offline,
        fallback,
    })
}

// ── Preference file ─────────────────────────────────────────────────

/// Preferences stored as a flat TOML table of strings.
#[derive(Debug, Clone)]
pub struct FilePreferences {
    path: PathBuf,
}

impl FilePreferences {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Backend at the platform data directory.
    pub fn default_location() -> Self {
        Self::new(preferences_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every stored entry, sorted by key.
    pub fn entries(&self) -> Result<Vec<(String, String)>, PreferenceError> {
        Ok(self
            .table()?
            .into_iter()
            .filter_map(|(k, v)| v.as_str().map(|s| (k, s.to_owned())))
            .collect())
    }

    fn table(&self) -> Result<toml::Table, PreferenceError> {
        if !self.path.exists() {
            return Ok(toml::Table::new());
        }
        let raw = std::fs::read_to_string(&self.path)?;
        raw.parse::<toml::Table>()
            .map_err(|e| PreferenceError::Unavailable(format!("{}: {e}", self.path.display())))
    }
}

impl PreferenceBackend for FilePreferences {
    fn read(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        Ok(self
            .table()?
            .get(key)
            .and_then(|v| v.as_str())
            .map(str::to_owned))
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), PreferenceError> {
        let mut table = self.table()?;
        table.insert(key.to_owned(), toml::Value::String(value.to_owned()));

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let raw = toml::to_string_pretty(&table)
            .map_err(|e| PreferenceError::Unavailable(e.to_string()))?;
        std::fs::write(&self.path, raw)?;
        Ok(())
    }
}
