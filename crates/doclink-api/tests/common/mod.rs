//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use doclink_core::repository::CacheStore;
use doclink_reporting::{DocsUrlProvider, ErrorReporter};
use doclink_resolution::ResolutionService;
use doclink_store::mapped_lookup::MappedDescriptionLookup;
use http_body_util::BodyExt;
use tower::ServiceExt;

use doclink_api::messages::builtin_catalog;
use doclink_api::state::AppState;

/// Code mapping used across all integration tests.
pub const ERROR_CODES: &str = r#"{
    "1jwqa": "https://docs.example.com/errors/1jwqa",
    "2kawqa1d": "https://docs.example.com/errors/2kawqa1d"
}"#;

/// Build application state over `cache` with the shared code mapping.
pub fn build_test_state(cache: Arc<dyn CacheStore>) -> AppState {
    let lookup = MappedDescriptionLookup::from_json_str(ERROR_CODES).unwrap();
    let service = ResolutionService::builder()
        .cache(cache)
        .lookup(Arc::new(lookup))
        .build()
        .unwrap();
    let reporter = ErrorReporter::new(
        "en-US".parse().unwrap(),
        Arc::new(DocsUrlProvider::new("https://docs.example.com/errors")),
        builtin_catalog().unwrap(),
    );
    AppState::new(Arc::new(service), Arc::new(reporter))
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}
