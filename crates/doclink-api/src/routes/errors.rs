//! Routes for resolving error description locations.

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::{Json, Router, routing::get};
use doclink_core::clock::SystemClock;
use doclink_core::code::{ErrorCode, InvocationContext};
use doclink_core::error::ServiceError;
use doclink_core::location::ErrorDescriptionLocation;
use serde::Serialize;
use tracing::instrument;
use uuid::Uuid;

use crate::error::ApiError;
use crate::messages::ReportedServiceError;
use crate::state::AppState;

/// Header carrying a caller-supplied correlation ID.
pub const CORRELATION_ID_HEADER: &str = "x-correlation-id";

/// Response body for a resolved location.
#[derive(Debug, Serialize)]
pub struct LocationResponse {
    /// The code that was resolved.
    pub error_code: ErrorCode,
    /// Where the description lives.
    pub location: ErrorDescriptionLocation,
    /// Correlation ID of the invocation.
    pub correlation_id: Uuid,
}

fn invocation_context(headers: &HeaderMap) -> InvocationContext {
    headers
        .get(CORRELATION_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| Uuid::parse_str(value).ok())
        .map_or_else(InvocationContext::new_instance, |id| {
            InvocationContext::with_correlation_id(id, &SystemClock)
        })
}

/// GET /{code}/location
#[instrument(skip(state, headers))]
async fn description_location(
    State(state): State<AppState>,
    Path(raw_code): Path<String>,
    headers: HeaderMap,
) -> Result<Json<LocationResponse>, ApiError> {
    let code = ErrorCode::parse(&raw_code)?;
    let context = invocation_context(&headers);

    let resolved = state
        .service
        .description_location_for(&code, &context)
        .await
        .inspect_err(|err| {
            if matches!(err, ServiceError::CacheStore(_) | ServiceError::Lookup(_)) {
                state.reporter.report(&ReportedServiceError(err));
            }
        })?;

    match resolved {
        Some(location) => Ok(Json(LocationResponse {
            error_code: code,
            location,
            correlation_id: context.correlation_id,
        })),
        None => Err(ApiError::NotFound(code.to_string())),
    }
}

/// Returns the router for error description lookups.
pub fn router() -> Router<AppState> {
    Router::new().route("/{code}/location", get(description_location))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use doclink_core::repository::{CacheStore, DescriptionLookup};
    use doclink_reporting::{DocsUrlProvider, ErrorReporter};
    use doclink_resolution::ResolutionService;
    use doclink_test_support::{
        CountingLookup, EmptyCacheStore, FailingCacheStore, RecordingCacheStore, location_for,
    };
    use http_body_util::BodyExt;
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::messages::builtin_catalog;

    fn app_state_with(
        cache: Arc<dyn CacheStore>,
        lookup: Arc<dyn DescriptionLookup>,
    ) -> AppState {
        let service = ResolutionService::builder()
            .cache(cache)
            .lookup(lookup)
            .build()
            .unwrap();
        let reporter = ErrorReporter::new(
            "en-US".parse().unwrap(),
            Arc::new(DocsUrlProvider::new("https://docs.example.com/errors")),
            builtin_catalog().unwrap(),
        );
        AppState::new(Arc::new(service), Arc::new(reporter))
    }

    async fn get(state: AppState, uri: &str, correlation_id: Option<&str>) -> (StatusCode, Value) {
        let mut request = Request::builder().method("GET").uri(uri);
        if let Some(id) = correlation_id {
            request = request.header(CORRELATION_ID_HEADER, id);
        }
        let response = router()
            .with_state(state)
            .oneshot(request.body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&body_bytes).unwrap())
    }

    #[tokio::test]
    async fn test_known_code_returns_location() {
        // Arrange
        let code = ErrorCode::new("1jwqa");
        let state = app_state_with(
            Arc::new(EmptyCacheStore),
            Arc::new(CountingLookup::with_entries([(
                code.clone(),
                location_for(&code),
            )])),
        );

        // Act
        let (status, json) = get(state, "/1jwqa/location", None).await;

        // Assert
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["error_code"], "1jwqa");
        assert_eq!(json["location"]["kind"], "external");
        assert_eq!(
            json["location"]["uri"],
            "https://docs.example.com/errors/1jwqa"
        );
    }

    #[tokio::test]
    async fn test_unknown_code_returns_404() {
        let state = app_state_with(
            Arc::new(RecordingCacheStore::new()),
            Arc::new(CountingLookup::empty()),
        );

        let (status, json) = get(state, "/nope/location", None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"], "description_location_not_found");
    }

    #[tokio::test]
    async fn test_correlation_header_is_threaded_into_context() {
        // Arrange
        let code = ErrorCode::new("traced");
        let correlation_id = Uuid::new_v4();
        let lookup = Arc::new(CountingLookup::with_entries([(
            code.clone(),
            location_for(&code),
        )]));
        let state = app_state_with(Arc::new(EmptyCacheStore), lookup.clone());

        // Act
        let (status, json) = get(
            state,
            "/traced/location",
            Some(&correlation_id.to_string()),
        )
        .await;

        // Assert
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["correlation_id"], correlation_id.to_string());
        let calls = lookup.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].1.correlation_id, correlation_id);
    }

    #[tokio::test]
    async fn test_blank_code_returns_400() {
        let state = app_state_with(
            Arc::new(EmptyCacheStore),
            Arc::new(CountingLookup::empty()),
        );

        let (status, json) = get(state, "/%20/location", None).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "validation_error");
    }

    #[tokio::test]
    async fn test_cache_failure_returns_502() {
        let state = app_state_with(
            Arc::new(FailingCacheStore),
            Arc::new(CountingLookup::empty()),
        );

        let (status, json) = get(state, "/x/location", None).await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(json["error"], "upstream_error");
    }

    #[tokio::test]
    async fn test_disposed_service_returns_503() {
        let state = app_state_with(
            Arc::new(EmptyCacheStore),
            Arc::new(CountingLookup::empty()),
        );
        state.service.dispose().await;

        let (status, json) = get(state, "/x/location", None).await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(json["error"], "service_unavailable");
    }
}
