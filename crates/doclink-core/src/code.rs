//! Error codes and invocation contexts.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::clock::{Clock, SystemClock};
use crate::error::ServiceError;

/// Opaque identifier naming a specific error condition.
///
/// Used as the cache and lookup key. Equality and hashing are by value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorCode(String);

impl ErrorCode {
    /// Wraps a trusted code value.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Parses an untrusted code value, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Validation` if the value is blank.
    pub fn parse(value: &str) -> Result<Self, ServiceError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ServiceError::Validation(
                "error code must not be empty".to_owned(),
            ));
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ErrorCode {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Correlation data created once per external request.
///
/// Carries no behavior; it is threaded unchanged through the lookup and
/// into lifecycle events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvocationContext {
    /// Correlation ID for tracing a request through its effects.
    pub correlation_id: Uuid,
    /// When the context was created.
    pub created_at: DateTime<Utc>,
}

impl InvocationContext {
    /// Creates a context with a fresh correlation ID.
    #[must_use]
    pub fn new_instance() -> Self {
        Self::with_correlation_id(Uuid::new_v4(), &SystemClock)
    }

    /// Creates a context that carries an existing correlation ID.
    #[must_use]
    pub fn with_correlation_id(correlation_id: Uuid, clock: &dyn Clock) -> Self {
        Self {
            correlation_id,
            created_at: clock.now(),
        }
    }
}
