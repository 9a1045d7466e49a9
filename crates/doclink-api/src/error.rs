//! Doclink API — error types.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use doclink_core::error::ServiceError;
use doclink_reporting::ReportingError;
use serde::Serialize;
use thiserror::Error;

/// Startup and runtime errors for the API server.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required environment variable is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// Database connection or pool error.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Network binding or I/O error.
    #[error("server error: {0}")]
    Server(#[from] std::io::Error),

    /// The resolution service could not be assembled.
    #[error("service error: {0}")]
    Service(#[from] ServiceError),

    /// The message catalog could not be loaded.
    #[error("reporting error: {0}")]
    Reporting(#[from] ReportingError),
}

/// JSON body returned for error responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Machine-readable error code.
    pub error: &'static str,
    /// Human-readable error message.
    pub message: String,
}

/// HTTP-layer failures.
#[derive(Debug)]
pub enum ApiError {
    /// The service failed.
    Service(ServiceError),
    /// No description location exists for the requested code.
    NotFound(String),
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        Self::Service(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self {
            Self::NotFound(code) => (
                StatusCode::NOT_FOUND,
                "description_location_not_found",
                format!("no description location for error code {code}"),
            ),
            Self::Service(err) => {
                let (status, error_code) = match &err {
                    ServiceError::Validation(_) => (StatusCode::BAD_REQUEST, "validation_error"),
                    ServiceError::CacheStore(_) | ServiceError::Lookup(_) => {
                        (StatusCode::BAD_GATEWAY, "upstream_error")
                    }
                    ServiceError::Configuration(_) => {
                        (StatusCode::INTERNAL_SERVER_ERROR, "configuration_error")
                    }
                    ServiceError::Disposed => {
                        (StatusCode::SERVICE_UNAVAILABLE, "service_unavailable")
                    }
                };
                (status, error_code, err.to_string())
            }
        };

        let body = ErrorBody {
            error: error_code,
            message,
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: ApiError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_not_found_maps_to_404() {
        assert_eq!(
            status_of(ApiError::NotFound("1jwqa".into())),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_validation_maps_to_400() {
        assert_eq!(
            status_of(ServiceError::Validation("blank".into()).into()),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_collaborator_failures_map_to_502() {
        assert_eq!(
            status_of(ServiceError::CacheStore("down".into()).into()),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            status_of(ServiceError::Lookup("down".into()).into()),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn test_disposed_maps_to_503() {
        assert_eq!(
            status_of(ServiceError::Disposed.into()),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn test_configuration_maps_to_500() {
        assert_eq!(
            status_of(ServiceError::Configuration("no cache".into()).into()),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
