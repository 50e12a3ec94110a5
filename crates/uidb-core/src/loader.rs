// ── Catalog loader ──
//
// One fetch of the remote feed per load. Any fetch failure degrades to the
// fallback snapshot; only "no feed and no usable fallback" is an error.

use std::future::Future;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};
use url::Url;

use uidb_api::{CatalogClient, CatalogResponse, Device, TransportConfig, parse_catalog};

use crate::config::CatalogConfig;
use crate::error::CoreError;

/// Catalog snapshot compiled into the binary.
pub const BUNDLED_CATALOG: &str = include_str!("../data/fallback.json");

// ── Fetcher seam ─────────────────────────────────────────────────────

/// Source of the live catalog. Implemented by [`CatalogClient`]; tests
/// substitute their own.
pub trait CatalogFetcher {
    fn fetch(&self) -> impl Future<Output = Result<CatalogResponse, uidb_api::Error>> + Send;
}

impl CatalogFetcher for CatalogClient {
    fn fetch(&self) -> impl Future<Output = Result<CatalogResponse, uidb_api::Error>> + Send {
        self.fetch_catalog()
    }
}

// ── Fallback ─────────────────────────────────────────────────────────

/// Where the fallback snapshot comes from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Fallback {
    /// The snapshot bundled at build time.
    #[default]
    Bundled,
    /// A caller-supplied document of the same shape as the feed.
    Json(String),
    /// No fallback: a failed fetch is fatal.
    None,
}

impl Fallback {
    /// Raw JSON of the snapshot, if any.
    pub fn raw(&self) -> Option<&str> {
        match self {
            Self::Bundled => Some(BUNDLED_CATALOG),
            Self::Json(raw) => Some(raw),
            Self::None => None,
        }
    }
}

// ── Outcome ──────────────────────────────────────────────────────────

/// Result of one load cycle.
#[derive(Debug, Clone)]
pub struct LoadOutcome {
    pub devices: Vec<Device>,
    /// `true` when the devices came from the fallback snapshot.
    pub using_fallback: bool,
    pub version: String,
    pub loaded_at: DateTime<Utc>,
}

impl LoadOutcome {
    fn new(catalog: CatalogResponse, using_fallback: bool) -> Self {
        Self {
            devices: catalog.devices,
            using_fallback,
            version: catalog.version,
            loaded_at: Utc::now(),
        }
    }
}

// ── Loader ───────────────────────────────────────────────────────────

pub struct Loader<F> {
    fetcher: F,
    fallback: Fallback,
    offline: bool,
}

impl<F: CatalogFetcher> Loader<F> {
    /// Loader with the bundled fallback.
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher,
            fallback: Fallback::Bundled,
            offline: false,
        }
    }

    #[must_use]
    pub fn with_fallback(mut self, fallback: Fallback) -> Self {
        self.fallback = fallback;
        self
    }

    /// Skip the fetch entirely and serve the fallback.
    #[must_use]
    pub fn offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        self
    }

    /// Load the catalog.
    ///
    /// Fetch errors are logged and absorbed by the fallback. Returns
    /// [`CoreError::NoData`] only when there is no fallback or it does not
    /// parse.
    pub async fn load(&self) -> Result<LoadOutcome, CoreError> {
        if self.offline {
            debug!("offline mode, skipping catalog fetch");
            return self.load_fallback("offline mode");
        }

        match self.fetcher.fetch().await {
            Ok(catalog) => {
                info!(
                    devices = catalog.devices.len(),
                    version = %catalog.version,
                    "catalog loaded from feed"
                );
                Ok(LoadOutcome::new(catalog, false))
            }
            Err(e) => {
                warn!(
                    error = %e,
                    status = ?e.status(),
                    transient = e.is_transient(),
                    "catalog fetch failed, using fallback snapshot"
                );
                self.load_fallback(&e.to_string())
            }
        }
    }

    fn load_fallback(&self, reason: &str) -> Result<LoadOutcome, CoreError> {
        let Some(raw) = self.fallback.raw() else {
            return Err(CoreError::NoData {
                reason: format!("{reason} (no fallback snapshot configured)"),
            });
        };

        let catalog = parse_catalog(raw).map_err(|e| CoreError::NoData {
            reason: format!("{reason} (fallback snapshot unreadable: {e})"),
        })?;

        info!(
            devices = catalog.devices.len(),
            version = %catalog.version,
            "catalog loaded from fallback snapshot"
        );
        Ok(LoadOutcome::new(catalog, true))
    }
}

impl Loader<CatalogClient> {
    /// Build a loader backed by the HTTP client.
    pub fn from_config(config: &CatalogConfig) -> Result<Self, CoreError> {
        let feed_url = Url::parse(&config.feed_url).map_err(|e| CoreError::Config {
            message: format!("invalid feed URL '{}': {e}", config.feed_url),
        })?;
        let transport = TransportConfig {
            tls: config.tls.clone(),
            timeout: config.timeout,
        };
        let client = CatalogClient::new(feed_url, &transport)?;

        Ok(Self::new(client)
            .with_fallback(config.fallback.clone())
            .offline(config.offline))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Fetcher that always fails and counts calls.
    #[derive(Default)]
    struct Failing {
        calls: AtomicUsize,
    }

    impl CatalogFetcher for Failing {
        fn fetch(&self) -> impl Future<Output = Result<CatalogResponse, uidb_api::Error>> + Send {
            self.calls.fetch_add(1, Ordering::SeqCst);
            async {
                Err(uidb_api::Error::HttpStatus {
                    status: 503,
                    url: "https://feed.invalid/public.json".into(),
                })
            }
        }
    }

    struct Fixed(CatalogResponse);

    impl CatalogFetcher for Fixed {
        fn fetch(&self) -> impl Future<Output = Result<CatalogResponse, uidb_api::Error>> + Send {
            let catalog = self.0.clone();
            async move { Ok(catalog) }
        }
    }

    #[test]
    fn bundled_snapshot_parses_and_is_not_empty() {
        let catalog = parse_catalog(BUNDLED_CATALOG).unwrap();
        assert!(!catalog.devices.is_empty());
        assert!(!catalog.version.is_empty());
    }

    #[test]
    fn failed_fetch_uses_fallback() {
        let outcome = tokio_test::block_on(Loader::new(Failing::default()).load()).unwrap();
        assert!(outcome.using_fallback);
        assert!(!outcome.devices.is_empty());
    }

    #[test]
    fn successful_fetch_is_not_fallback() {
        let catalog = CatalogResponse {
            devices: vec![serde_json::from_str(r#"{"id":"live"}"#).unwrap()],
            version: "live-1".into(),
        };
        let outcome = tokio_test::block_on(Loader::new(Fixed(catalog)).load()).unwrap();
        assert!(!outcome.using_fallback);
        assert_eq!(outcome.version, "live-1");
        assert_eq!(outcome.devices[0].id, "live");
    }

    #[test]
    fn no_fallback_is_fatal() {
        let loader = Loader::new(Failing::default()).with_fallback(Fallback::None);
        let err = tokio_test::block_on(loader.load()).unwrap_err();
        assert!(matches!(err, CoreError::NoData { .. }));
    }

    #[test]
    fn malformed_fallback_is_fatal() {
        let loader =
            Loader::new(Failing::default()).with_fallback(Fallback::Json("{not json".into()));
        let err = tokio_test::block_on(loader.load()).unwrap_err();
        assert!(matches!(err, CoreError::NoData { .. }));
    }

    #[test]
    fn custom_fallback_is_used_verbatim() {
        let loader = Loader::new(Failing::default()).with_fallback(Fallback::Json(
            r#"{"version":"mine","devices":[{"id":"x"},{"id":"y"}]}"#.into(),
        ));
        let outcome = tokio_test::block_on(loader.load()).unwrap();
        assert_eq!(outcome.version, "mine");
        assert_eq!(outcome.devices.len(), 2);
    }

    #[test]
    fn offline_skips_the_fetch() {
        let loader = Loader::new(Failing::default()).offline(true);
        let outcome = tokio_test::block_on(loader.load()).unwrap();
        assert!(outcome.using_fallback);
        assert_eq!(loader.fetcher.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn invalid_feed_url_is_config_error() {
        let config = CatalogConfig {
            feed_url: "not a url".into(),
            ..CatalogConfig::default()
        };
        let err = Loader::from_config(&config).err().unwrap();
        assert!(matches!(err, CoreError::Config { .. }));
    }
}
