// ── Runtime catalog configuration ──
//
// Describes *where* the catalog comes from and how to reach it. Core never
// reads config files: the CLI resolves `uidb-config` into a `CatalogConfig`
// and hands it in.

use std::time::Duration;

use uidb_api::{DEFAULT_FEED_URL, TlsMode};

use crate::loader::Fallback;

/// Configuration for a single catalog load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    /// Feed URL (parsed when the loader is built).
    pub feed_url: String,
    /// Request timeout for the single fetch.
    pub timeout: Duration,
    /// TLS verification strategy.
    pub tls: TlsMode,
    /// Skip the network and go straight to the fallback.
    pub offline: bool,
    /// Snapshot used when the fetch fails or is skipped.
    pub fallback: Fallback,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            feed_url: DEFAULT_FEED_URL.into(),
            timeout: Duration::from_secs(30),
            tls: TlsMode::default(),
            offline: false,
            fallback: Fallback::Bundled,
        }
    }
}
