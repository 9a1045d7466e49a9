//! Test cache stores — mock `CacheStore` implementations for tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use doclink_core::code::ErrorCode;
use doclink_core::error::ServiceError;
use doclink_core::location::ErrorDescriptionLocation;
use doclink_core::repository::CacheStore;

/// A cache store that records every `retrieve` and `store` call. Starts from
/// the configured entries; successful stores become visible to later reads.
#[derive(Debug, Default)]
pub struct RecordingCacheStore {
    entries: Mutex<HashMap<ErrorCode, ErrorDescriptionLocation>>,
    retrieved: Mutex<Vec<ErrorCode>>,
    stored: Mutex<Vec<(ErrorCode, ErrorDescriptionLocation)>>,
}

impl RecordingCacheStore {
    /// Create an empty recording store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a recording store pre-populated with `entries`.
    #[must_use]
    pub fn with_entries(
        entries: impl IntoIterator<Item = (ErrorCode, ErrorDescriptionLocation)>,
    ) -> Self {
        Self {
            entries: Mutex::new(entries.into_iter().collect()),
            ..Self::default()
        }
    }

    /// Returns a snapshot of all codes passed to `retrieve`.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn retrieved_codes(&self) -> Vec<ErrorCode> {
        self.retrieved.lock().unwrap().clone()
    }

    /// Returns a snapshot of all `(code, location)` pairs passed to `store`.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn stored_entries(&self) -> Vec<(ErrorCode, ErrorDescriptionLocation)> {
        self.stored.lock().unwrap().clone()
    }
}

#[async_trait]
impl CacheStore for RecordingCacheStore {
    async fn retrieve(
        &self,
        code: &ErrorCode,
    ) -> Result<Option<ErrorDescriptionLocation>, ServiceError> {
        self.retrieved.lock().unwrap().push(code.clone());
        Ok(self.entries.lock().unwrap().get(code).cloned())
    }

    async fn store(
        &self,
        code: &ErrorCode,
        location: &ErrorDescriptionLocation,
    ) -> Result<(), ServiceError> {
        self.stored
            .lock()
            .unwrap()
            .push((code.clone(), location.clone()));
        self.entries
            .lock()
            .unwrap()
            .insert(code.clone(), location.clone());
        Ok(())
    }
}

/// A cache store that never holds anything and silently accepts writes.
/// Useful for forcing every resolution down the lookup path.
#[derive(Debug)]
pub struct EmptyCacheStore;

#[async_trait]
impl CacheStore for EmptyCacheStore {
    async fn retrieve(
        &self,
        _code: &ErrorCode,
    ) -> Result<Option<ErrorDescriptionLocation>, ServiceError> {
        Ok(None)
    }

    async fn store(
        &self,
        _code: &ErrorCode,
        _location: &ErrorDescriptionLocation,
    ) -> Result<(), ServiceError> {
        Ok(())
    }
}

/// A cache store that always returns an error. Useful for testing
/// error-handling paths.
#[derive(Debug)]
pub struct FailingCacheStore;

#[async_trait]
impl CacheStore for FailingCacheStore {
    async fn retrieve(
        &self,
        _code: &ErrorCode,
    ) -> Result<Option<ErrorDescriptionLocation>, ServiceError> {
        Err(ServiceError::CacheStore("connection refused".into()))
    }

    async fn store(
        &self,
        _code: &ErrorCode,
        _location: &ErrorDescriptionLocation,
    ) -> Result<(), ServiceError> {
        Err(ServiceError::CacheStore("connection refused".into()))
    }
}
