//! Localized messages for service failures.

use doclink_core::error::ServiceError;
use doclink_reporting::{MessageArg, MessageCatalog, ReportableError, ReportingError};

const BUILTIN_CATALOG: &str = include_str!("../resources/messages.json");

/// Loads the catalog bundled with the binary.
///
/// # Errors
///
/// Returns `ReportingError` if the bundled catalog is malformed.
pub fn builtin_catalog() -> Result<MessageCatalog, ReportingError> {
    MessageCatalog::from_json_str(BUILTIN_CATALOG)
}

/// Presents a `ServiceError` to an `ErrorReporter`.
#[derive(Debug)]
pub struct ReportedServiceError<'a>(pub &'a ServiceError);

impl ReportableError for ReportedServiceError<'_> {
    fn namespace(&self) -> &str {
        "doclink"
    }

    fn code(&self) -> &str {
        match self.0 {
            ServiceError::Validation(_) => "validation",
            ServiceError::CacheStore(_) => "cache-store",
            ServiceError::Lookup(_) => "lookup",
            ServiceError::Configuration(_) => "configuration",
            ServiceError::Disposed => "disposed",
        }
    }

    fn parameters(&self) -> Vec<MessageArg> {
        match self.0 {
            ServiceError::Validation(detail)
            | ServiceError::CacheStore(detail)
            | ServiceError::Lookup(detail)
            | ServiceError::Configuration(detail) => vec![detail.as_str().into()],
            ServiceError::Disposed => Vec::new(),
        }
    }
}
