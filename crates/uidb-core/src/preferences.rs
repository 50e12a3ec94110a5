// ── UI preferences ──
//
// Small, best-effort key/value settings (view mode, dismissed tips). Losing
// a preference is never fatal: backend failures are logged and the caller
// sees the default.

use std::collections::HashMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use thiserror::Error;
use tracing::warn;

/// Namespace prepended to every stored key.
pub const SETTINGS_PREFIX: &str = "app_setting_";

pub const VIEW_MODE_KEY: &str = "viewMode";
pub const KEYBOARD_TIP_KEY: &str = "keyboardTipDismissed";

#[derive(Debug, Error)]
pub enum PreferenceError {
    #[error("preference storage unavailable: {0}")]
    Unavailable(String),

    #[error("preference storage I/O: {0}")]
    Io(#[from] std::io::Error),
}

/// Raw storage behind [`Preferences`]. Keys arrive already namespaced.
pub trait PreferenceBackend {
    fn read(&self, key: &str) -> Result<Option<String>, PreferenceError>;
    fn write(&mut self, key: &str, value: &str) -> Result<(), PreferenceError>;
}

// ── In-memory backend ────────────────────────────────────────────────

/// Backend that lives for the process. Can be told to refuse writes.
#[derive(Debug, Default, Clone)]
pub struct MemoryBackend {
    values: HashMap<String, String>,
    read_only: bool,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend whose writes always fail, like a disabled browser store.
    pub fn read_only() -> Self {
        Self {
            read_only: true,
            ..Self::default()
        }
    }

    /// Every stored entry, sorted by key.
    pub fn entries(&self) -> Vec<(String, String)> {
        let mut entries: Vec<_> = self
            .values
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        entries.sort();
        entries
    }
}

impl PreferenceBackend for MemoryBackend {
    fn read(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        Ok(self.values.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), PreferenceError> {
        if self.read_only {
            return Err(PreferenceError::Unavailable("storage is read-only".into()));
        }
        self.values.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

// ── View mode ────────────────────────────────────────────────────────

/// How the device list is rendered.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Table,
    Card,
}

// ── Preferences ──────────────────────────────────────────────────────

pub struct Preferences<B> {
    backend: B,
}

impl<B: PreferenceBackend> Preferences<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Stored value for `key`, or `None` when missing or unreadable.
    pub fn get(&self, key: &str) -> Option<String> {
        let full = namespaced(key);
        match self.backend.read(&full) {
            Ok(value) => value,
            Err(e) => {
                warn!(key = %full, error = %e, "preference read failed");
                None
            }
        }
    }

    /// Store `value` under `key`. Failures are logged, never returned.
    pub fn set(&mut self, key: &str, value: &str) {
        let full = namespaced(key);
        if let Err(e) = self.backend.write(&full, value) {
            warn!(key = %full, error = %e, "preference write failed");
        }
    }

    /// Current view mode. Missing or unrecognised values mean table.
    pub fn view_mode(&self) -> ViewMode {
        self.get(VIEW_MODE_KEY)
            .and_then(|v| ViewMode::from_str(&v).ok())
            .unwrap_or_default()
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.set(VIEW_MODE_KEY, &mode.to_string());
    }

    pub fn keyboard_tip_dismissed(&self) -> bool {
        self.get(KEYBOARD_TIP_KEY).as_deref() == Some("true")
    }

    pub fn dismiss_keyboard_tip(&mut self) {
        self.set(KEYBOARD_TIP_KEY, "true");
    }
}

fn namespaced(key: &str) -> String {
    format!("{SETTINGS_PREFIX}{key}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_then_get_round_trips() {
        let mut prefs = Preferences::new(MemoryBackend::new());
        prefs.set("viewMode", "card");
        assert_eq!(prefs.get("viewMode").as_deref(), Some("card"));
    }

    #[test]
    fn keys_are_namespaced() {
        let mut prefs = Preferences::new(MemoryBackend::new());
        prefs.set("viewMode", "card");
        assert_eq!(
            prefs.backend().read("app_setting_viewMode").ok().flatten().as_deref(),
            Some("card")
        );
    }

    #[test]
    fn memory_entries_are_sorted_raw_keys() {
        let mut prefs = Preferences::new(MemoryBackend::new());
        prefs.set_view_mode(ViewMode::Card);
        prefs.dismiss_keyboard_tip();
        assert_eq!(
            prefs.backend().entries(),
            vec![
                ("app_setting_keyboardTipDismissed".to_owned(), "true".to_owned()),
                ("app_setting_viewMode".to_owned(), "card".to_owned()),
            ]
        );
    }

    #[test]
    fn failing_write_is_swallowed() {
        let mut prefs = Preferences::new(MemoryBackend::read_only());
        prefs.set("viewMode", "card");
        assert_eq!(prefs.get("viewMode"), None);
        assert_eq!(prefs.view_mode(), ViewMode::Table);
    }

    #[test]
    fn view_mode_defaults_and_parses() {
        let mut prefs = Preferences::new(MemoryBackend::new());
        assert_eq!(prefs.view_mode(), ViewMode::Table);
        prefs.set_view_mode(ViewMode::Card);
        assert_eq!(prefs.view_mode(), ViewMode::Card);
        prefs.set("viewMode", "mosaic");
        assert_eq!(prefs.view_mode(), ViewMode::Table);
    }

    #[test]
    fn keyboard_tip_dismissal() {
        let mut prefs = Preferences::new(MemoryBackend::new());
        assert!(!prefs.keyboard_tip_dismissed());
        prefs.dismiss_keyboard_tip();
        assert!(prefs.keyboard_tip_dismissed());
        assert_eq!(prefs.get("keyboardTipDismissed").as_deref(), Some("true"));
    }

    struct Broken;

    impl PreferenceBackend for Broken {
        fn read(&self, _key: &str) -> Result<Option<String>, PreferenceError> {
            Err(PreferenceError::Unavailable("disabled".into()))
        }

        fn write(&mut self, _key: &str, _value: &str) -> Result<(), PreferenceError> {
            Err(PreferenceError::Unavailable("disabled".into()))
        }
    }

    #[test]
    fn unreadable_storage_falls_back_to_defaults() {
        let mut prefs = Preferences::new(Broken);
        prefs.dismiss_keyboard_tip();
        assert!(!prefs.keyboard_tip_dismissed());
        assert_eq!(prefs.view_mode(), ViewMode::Table);
    }
}
