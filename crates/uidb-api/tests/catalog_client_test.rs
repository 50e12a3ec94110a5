#![allow(clippy::unwrap_used)]
// Integration tests for `CatalogClient` using wiremock.

use serde_json::json;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use uidb_api::{CatalogClient, Error};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, CatalogClient) {
    let server = MockServer::start().await;
    let feed_url = Url::parse(&format!("{}/fingerprint/ui/public.json", server.uri())).unwrap();
    let client = CatalogClient::with_client(reqwest::Client::new(), feed_url);
    (server, client)
}

fn feed_path() -> &'static str {
    "/fingerprint/ui/public.json"
}

// ── Success ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_fetch_catalog() {
    let (server, client) = setup().await;

    let body = json!({
        "version": "2024.10.1",
        "devices": [
            {
                "id": "e9a5ad9c-3e2a-4bd0-9a52-8fd4d8f2a1a1",
                "line": { "id": "unifi-network", "name": "UniFi Network" },
                "product": { "name": "Dream Machine Pro", "abbrev": "UDM-Pro" },
                "shortnames": ["UDMPRO"],
                "images": { "default": "0a1b2c" },
                "sku": "UDM-Pro"
            },
            {
                "id": "5f5b8d2e-8c1e-4e0b-8a5f-2b7f8d3c4e5f",
                "line": { "id": "unifi-protect", "name": "UniFi Protect" },
                "product": { "name": "G4 Bullet", "abbrev": "UVC-G4-Bullet" }
            }
        ]
    });

    Mock::given(method("GET"))
        .and(path(feed_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&server)
        .await;

    let catalog = client.fetch_catalog().await.unwrap();

    assert_eq!(catalog.version, "2024.10.1");
    assert_eq!(catalog.devices.len(), 2);
    assert_eq!(catalog.devices[0].product.name, "Dream Machine Pro");
    assert_eq!(catalog.devices[0].line.id, "unifi-network");
    assert_eq!(catalog.devices[0].sku().as_deref(), Some("UDM-Pro"));
    assert!(catalog.devices[1].shortnames.is_empty());
    assert!(catalog.devices[1].image_url(20).is_none());
}

// ── Failures ────────────────────────────────────────────────────────

#[tokio::test]
async fn test_fetch_catalog_server_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(feed_path()))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream down"))
        .mount(&server)
        .await;

    let result = client.fetch_catalog().await;

    assert!(
        matches!(result, Err(Error::HttpStatus { status: 500, .. })),
        "expected HttpStatus 500, got: {result:?}"
    );
}

#[tokio::test]
async fn test_fetch_catalog_not_found() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(feed_path()))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = client.fetch_catalog().await.unwrap_err();
    assert!(err.is_not_found(), "expected not found, got: {err:?}");
}

#[tokio::test]
async fn test_fetch_catalog_malformed_body() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(feed_path()))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let result = client.fetch_catalog().await;

    match result {
        Err(Error::Deserialization { body, .. }) => {
            assert_eq!(body, "<html>maintenance</html>");
        }
        other => panic!("expected Deserialization error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_fetch_catalog_connection_refused() {
    // Port 9 (discard) on localhost is not listening in test environments.
    let client = CatalogClient::with_client(
        reqwest::Client::new(),
        Url::parse("http://127.0.0.1:9/public.json").unwrap(),
    );

    let result = client.fetch_catalog().await;

    assert!(
        matches!(result, Err(Error::Transport(_))),
        "expected Transport error, got: {result:?}"
    );
}
