//! Integration tests for the health endpoint.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use doclink_store::memory::InMemoryCacheStore;

#[tokio::test]
async fn test_health_returns_ok_and_version() {
    let state = common::build_test_state(Arc::new(InMemoryCacheStore::new()));
    let app = doclink_api::build_router(state);

    let (status, json) = common::get_json(app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
}
