//! Reporting error types.

use thiserror::Error;

/// Errors raised while assembling a reporter.
#[derive(Debug, Error)]
pub enum ReportingError {
    /// A locale tag could not be parsed.
    #[error("invalid locale tag: {0:?}")]
    InvalidLocale(String),

    /// A message catalog document could not be parsed.
    #[error("invalid message catalog: {0}")]
    InvalidCatalog(#[from] serde_json::Error),
}
