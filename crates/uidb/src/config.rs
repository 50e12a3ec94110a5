//! CLI configuration: a thin wrapper around `uidb_config`.
//!
//! Re-exports the shared types and adds resolution that respects
//! `GlobalOpts` flag overrides (--feed-url, --offline, --output, ...).

use std::path::Path;

use clap::ValueEnum;
use tracing::warn;

use uidb_core::{
    CatalogConfig, MemoryBackend, PreferenceBackend, PreferenceError, Preferences,
};

use crate::cli::{ColorMode, GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output::OutputOpts;

// ── Re-exports from shared crate ────────────────────────────────────

pub use uidb_config::{
    Config, FilePreferences, config_path, load_config, load_config_or_default, save_config,
};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Translate the file config plus global flags into a `CatalogConfig`.
///
/// CLI flag overrides take priority over config values.
pub fn catalog_config(global: &GlobalOpts, cfg: &Config) -> Result<CatalogConfig, CliError> {
    let mut cfg = cfg.clone();
    if let Some(ref url) = global.feed_url {
        cfg.feed_url.clone_from(url);
    }
    if global.offline {
        cfg.offline = true;
    }
    if let Some(ref path) = global.fallback_file {
        cfg.fallback_file = Some(path.clone());
    }
    if let Some(timeout) = global.timeout {
        cfg.timeout = timeout;
    }
    Ok(uidb_config::resolve_catalog_config(&cfg)?)
}

/// Resolve output format, color and quiet mode (flag > config > default).
pub fn output_opts(global: &GlobalOpts, cfg: &Config) -> OutputOpts {
    let format = global.output.unwrap_or_else(|| {
        OutputFormat::from_str(&cfg.defaults.output, true).unwrap_or(OutputFormat::Table)
    });
    let color = global.color.unwrap_or_else(|| {
        ColorMode::from_str(&cfg.defaults.color, true).unwrap_or(ColorMode::Auto)
    });
    OutputOpts::new(format, color, global.quiet)
}

// ── Preference storage ──────────────────────────────────────────────

/// Backend chosen at startup: the preferences file, or memory with
/// `--no-persist`.
pub enum PrefStore {
    File(FilePreferences),
    Memory(MemoryBackend),
}

impl PrefStore {
    pub fn for_flags(global: &GlobalOpts) -> Self {
        if global.no_persist {
            Self::Memory(MemoryBackend::new())
        } else {
            Self::File(FilePreferences::default_location())
        }
    }

    /// Backing file, `None` when nothing is persisted.
    pub fn location(&self) -> Option<&Path> {
        match self {
            Self::File(f) => Some(f.path()),
            Self::Memory(_) => None,
        }
    }

    /// Raw stored entries under their namespaced keys. An unreadable file
    /// reads as empty, like every other preference access.
    pub fn entries(&self) -> Vec<(String, String)> {
        match self {
            Self::File(f) => f.entries().unwrap_or_else(|e| {
                warn!(path = %f.path().display(), error = %e, "preferences unreadable");
                Vec::new()
            }),
            Self::Memory(m) => m.entries(),
        }
    }
}

impl PreferenceBackend for PrefStore {
    fn read(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        match self {
            Self::File(f) => f.read(key),
            Self::Memory(m) => m.read(key),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), PreferenceError> {
        match self {
            Self::File(f) => f.write(key, value),
            Self::Memory(m) => m.write(key, value),
        }
    }
}

pub type CliPreferences = Preferences<PrefStore>;

pub fn preferences(global: &GlobalOpts) -> CliPreferences {
    Preferences::new(PrefStore::for_flags(global))
}
