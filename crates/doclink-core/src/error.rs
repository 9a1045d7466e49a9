//! Domain error types.

use thiserror::Error;

/// Top-level error type for description resolution.
///
/// A missing description location is never an error; it is an empty
/// result. Every variant here is a genuine failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// A validation error on caller input.
    #[error("validation error: {0}")]
    Validation(String),

    /// The cache store failed to complete a read or a write.
    #[error("cache store error: {0}")]
    CacheStore(String),

    /// The authoritative lookup failed to complete.
    #[error("lookup error: {0}")]
    Lookup(String),

    /// The service was assembled without a required collaborator.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The service was used after it was disposed.
    #[error("service has been disposed")]
    Disposed,
}
