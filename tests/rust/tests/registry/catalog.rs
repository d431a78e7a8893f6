//! Catalog service behavior: refresh, classification, fallback, queries

use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::json;

use mcphub_core::service::{CatalogService, RegistryClient, RegistryConfig, RegistryTransport};
use tests::mocks::{current_page, MockRegistryTransport};

fn service<T: RegistryTransport>(transport: T) -> CatalogService<T> {
    CatalogService::new(RegistryClient::with_transport(
        transport,
        RegistryConfig::default(),
    ))
}

#[tokio::test]
async fn test_refresh_classifies_every_record() {
    let transport = MockRegistryTransport::new().with_page(json!({
        "servers": [
            { "server": { "name": "acme/git-tools", "description": "github automation" } },
            { "server": { "name": "acme/pg", "description": "postgres queries" } },
            { "server": { "name": "acme/misc", "description": "odds and ends" } }
        ]
    }));
    let service = service(transport);

    let count = service.refresh().await;
    assert_eq!(count, 3);
    assert!(!service.is_fallback().await);

    let catalog = service.snapshot().await;
    assert_eq!(
        catalog.get("acme/git-tools").unwrap().category.as_deref(),
        Some("Dev Tools")
    );
    assert_eq!(
        catalog.get("acme/pg").unwrap().category.as_deref(),
        Some("Database")
    );
    assert_eq!(
        catalog.get("acme/misc").unwrap().category.as_deref(),
        Some("General")
    );
}

#[tokio::test]
async fn test_failed_aggregation_installs_fallback() {
    let transport = MockRegistryTransport::new().with_page_error(500);
    let service = service(transport);

    let count = service.refresh().await;
    assert!(count > 0);
    assert!(service.is_fallback().await);

    let catalog = service.snapshot().await;
    assert!(catalog.get("io.github.github/github-mcp-server").is_some());
}

#[tokio::test]
async fn test_empty_aggregation_installs_fallback() {
    let transport = MockRegistryTransport::new().with_page(json!({ "servers": [] }));
    let service = service(transport);

    service.refresh().await;
    assert!(service.is_fallback().await);
}

#[tokio::test]
async fn test_snapshot_and_fallback_flag_stay_paired() {
    // First refresh fails over to the fallback set, second succeeds; the
    // atomic read must report the flag matching the catalog it returns.
    let transport = MockRegistryTransport::new()
        .with_page_error(500)
        .with_page(current_page(&["a/one"], None));
    let service = service(transport);

    service.refresh().await;
    let (catalog, fallback) = service.snapshot_with_status().await;
    assert!(fallback);
    assert!(catalog.get("io.github.github/github-mcp-server").is_some());

    service.refresh().await;
    let (catalog, fallback) = service.snapshot_with_status().await;
    assert!(!fallback);
    assert!(catalog.get("a/one").is_some());
}

#[tokio::test]
async fn test_should_refresh_respects_ttl() {
    let transport = MockRegistryTransport::new().with_page(current_page(&["a/one"], None));
    let service = service(transport).with_refresh_ttl(Duration::from_secs(3600));

    assert!(service.should_refresh().await);
    service.refresh().await;
    assert!(!service.should_refresh().await);
}

#[tokio::test]
async fn test_ensure_fresh_refreshes_once_within_ttl() {
    let transport = MockRegistryTransport::new()
        .with_page(current_page(&["a/one"], None))
        .with_page(current_page(&["b/two"], None));
    let service = service(transport).with_refresh_ttl(Duration::from_secs(3600));

    service.ensure_fresh().await;
    service.ensure_fresh().await;
    assert_eq!(service.client().transport().page_calls(), 1);
}

#[tokio::test]
async fn test_catalog_search_and_category_filter() {
    let transport = MockRegistryTransport::new().with_page(json!({
        "servers": [
            { "server": { "name": "acme/github-bridge", "description": "sync github issues" } },
            { "server": { "name": "acme/weather", "description": "weather by location" } }
        ]
    }));
    let service = service(transport);
    service.refresh().await;

    let catalog = service.snapshot().await;
    let hits = catalog.search("GitHub");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, "acme/github-bridge");

    let dev_tools = catalog.by_category("Dev Tools");
    assert_eq!(dev_tools.len(), 1);

    let categories = catalog.categories();
    assert!(categories.contains(&("Dev Tools".to_string(), 1)));
}

#[tokio::test]
async fn test_get_or_fetch_falls_back_to_single_lookup() {
    let transport = MockRegistryTransport::new()
        .with_page(current_page(&["a/one"], None))
        .with_entry(json!({
            "server": { "name": "b/two", "description": "postgres admin" }
        }));
    let service = service(transport);
    service.refresh().await;

    // Cached entry comes from the catalog.
    assert!(service.get_or_fetch("a/one").await.is_some());

    // Miss triggers a single-record fetch, classified on the way in.
    let fetched = service.get_or_fetch("b/two").await.unwrap();
    assert_eq!(fetched.category.as_deref(), Some("Database"));

    // Unknown id with no upstream record is a plain None.
    assert!(service.get_or_fetch("c/none").await.is_none());
}
