#![allow(clippy::unwrap_used)]
// End-to-end load tests: HTTP feed through `Loader` into `CatalogContext`.

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use uidb_core::{
    Catalog, CatalogConfig, CatalogContext, CoreError, DetailView, Fallback, LoadState, Loader,
    QueryState,
};

const FEED_PATH: &str = "/fingerprint/ui/public.json";

fn config(server: &MockServer) -> CatalogConfig {
    CatalogConfig {
        feed_url: format!("{}{FEED_PATH}", server.uri()),
        timeout: Duration::from_secs(5),
        ..CatalogConfig::default()
    }
}

fn live_feed() -> serde_json::Value {
    json!({
        "version": "live-2024.11",
        "devices": [
            {
                "id": "a",
                "line": { "id": "unifi-network", "name": "UniFi" },
                "product": { "name": "Cloud Gateway Ultra", "abbrev": "UCG-Ultra" },
                "shortnames": ["UCGULTRA"]
            },
            {
                "id": "b",
                "line": { "id": "unifi-protect", "name": "UniFi Protect" },
                "product": { "name": "G5 Turret Ultra", "abbrev": "UVC-G5-Turret-Ultra" }
            },
            {
                "id": "c",
                "line": { "id": "unifi-network", "name": "UniFi" },
                "product": { "name": "Switch Flex Mini", "abbrev": "USW-Flex-Mini" }
            }
        ]
    })
}

// ── Live feed ───────────────────────────────────────────────────────

#[tokio::test]
async fn live_feed_is_used_when_reachable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(FEED_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(live_feed()))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = Loader::from_config(&config(&server))
        .unwrap()
        .load()
        .await
        .unwrap();

    assert!(!outcome.using_fallback);
    assert_eq!(outcome.version, "live-2024.11");
    assert_eq!(outcome.devices.len(), 3);
}

#[tokio::test]
async fn loaded_catalog_answers_queries() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(FEED_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(live_feed()))
        .mount(&server)
        .await;

    let outcome = Loader::from_config(&config(&server))
        .unwrap()
        .load()
        .await;
    let mut ctx = CatalogContext::new();
    ctx.apply_load(outcome);

    ctx.set_search_term("ultra");
    let ids: Vec<String> = ctx.results().iter().map(|d| d.id.clone()).collect();
    assert_eq!(ids, vec!["a", "b"]);

    match ctx.detail("b") {
        DetailView::Found { neighbors, .. } => {
            assert_eq!(neighbors.previous.unwrap().id, "a");
            assert_eq!(neighbors.next.unwrap().id, "c");
        }
        other => panic!("expected Found, got {other:?}"),
    }

    let catalog = ctx.catalog().unwrap();
    let state = QueryState::new().with_lines(["unifi-network"]);
    assert_eq!(catalog.query(&state).len(), 2);
}

// ── Fallback ────────────────────────────────────────────────────────

#[tokio::test]
async fn server_error_falls_back_to_bundled_snapshot() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(FEED_PATH))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = Loader::from_config(&config(&server))
        .unwrap()
        .load()
        .await
        .unwrap();

    assert!(outcome.using_fallback);
    assert!(!outcome.devices.is_empty());

    let catalog = Catalog::from_outcome(outcome);
    assert!(catalog.using_fallback());
    assert!(!catalog.product_lines().is_empty());
}

#[tokio::test]
async fn malformed_feed_falls_back() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(FEED_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let outcome = Loader::from_config(&config(&server))
        .unwrap()
        .load()
        .await
        .unwrap();
    assert!(outcome.using_fallback);
}

#[tokio::test]
async fn json_error_object_falls_back() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(FEED_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "error": "maintenance" })))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = Loader::from_config(&config(&server))
        .unwrap()
        .load()
        .await
        .unwrap();
    assert!(outcome.using_fallback);
    assert!(!outcome.devices.is_empty());
}

#[tokio::test]
async fn offline_mode_never_hits_the_network() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(live_feed()))
        .expect(0)
        .mount(&server)
        .await;

    let cfg = CatalogConfig {
        offline: true,
        ..config(&server)
    };
    let outcome = Loader::from_config(&cfg).unwrap().load().await.unwrap();
    assert!(outcome.using_fallback);
}

#[tokio::test]
async fn total_failure_surfaces_as_failed_state() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let cfg = CatalogConfig {
        fallback: Fallback::None,
        ..config(&server)
    };
    let outcome = Loader::from_config(&cfg).unwrap().load().await;
    assert!(matches!(outcome, Err(CoreError::NoData { .. })));

    let mut ctx = CatalogContext::new();
    ctx.apply_load(outcome);
    assert!(matches!(ctx.state(), LoadState::Failed(_)));
    assert!(ctx.results().is_empty());
}
