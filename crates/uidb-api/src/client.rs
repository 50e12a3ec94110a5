// Catalog feed HTTP client
//
// Wraps `reqwest::Client` with the feed URL and the status/decoding rules
// for `public.json`. One GET per call; retry and fallback policy belong to
// the caller.

use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::models::CatalogResponse;
use crate::transport::TransportConfig;

/// Public UniFi device database served from Ubiquiti's static CDN.
pub const DEFAULT_FEED_URL: &str = "https://static.ui.com/fingerprint/ui/public.json";

/// Raw HTTP client for the catalog feed.
pub struct CatalogClient {
    http: reqwest::Client,
    feed_url: Url,
}

impl CatalogClient {
    /// Create a new catalog client from a `TransportConfig`.
    pub fn new(feed_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self { http, feed_url })
    }

    /// Create a catalog client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, feed_url: Url) -> Self {
        Self { http, feed_url }
    }

    /// The feed URL this client fetches.
    pub fn feed_url(&self) -> &Url {
        &self.feed_url
    }

    /// Fetch and decode the full catalog.
    ///
    /// Non-2xx responses become [`Error::HttpStatus`]; bodies that are not a
    /// catalog become [`Error::Deserialization`] carrying the raw body.
    pub async fn fetch_catalog(&self) -> Result<CatalogResponse, Error> {
        debug!("GET {}", self.feed_url);

        let resp = self
            .http
            .get(self.feed_url.clone())
            .send()
            .await
            .map_err(Error::Transport)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                url: self.feed_url.to_string(),
            });
        }

        let body = resp.text().await.map_err(Error::Transport)?;
        let catalog = parse_catalog(&body)?;
        debug!(
            devices = catalog.devices.len(),
            version = %catalog.version,
            "catalog decoded"
        );
        Ok(catalog)
    }
}

/// Decode a catalog document (feed body or bundled snapshot).
pub fn parse_catalog(body: &str) -> Result<CatalogResponse, Error> {
    serde_json::from_str(body).map_err(|e| Error::Deserialization {
        message: e.to_string(),
        body: body.to_owned(),
    })
}
