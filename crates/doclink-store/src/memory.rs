//! In-memory `CacheStore`.

use std::collections::HashMap;

use async_trait::async_trait;
use doclink_core::code::ErrorCode;
use doclink_core::error::ServiceError;
use doclink_core::location::ErrorDescriptionLocation;
use doclink_core::repository::CacheStore;
use tokio::sync::RwLock;
use tracing::trace;

/// Process-local cache with no expiry.
#[derive(Debug, Default)]
pub struct InMemoryCacheStore {
    entries: RwLock<HashMap<ErrorCode, ErrorDescriptionLocation>>,
}

impl InMemoryCacheStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached codes.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Returns whether nothing is cached.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl CacheStore for InMemoryCacheStore {
    async fn retrieve(
        &self,
        code: &ErrorCode,
    ) -> Result<Option<ErrorDescriptionLocation>, ServiceError> {
        Ok(self.entries.read().await.get(code).cloned())
    }

    async fn store(
        &self,
        code: &ErrorCode,
        location: &ErrorDescriptionLocation,
    ) -> Result<(), ServiceError> {
        trace!(error_code = %code, "caching description location");
        self.entries
            .write()
            .await
            .insert(code.clone(), location.clone());
        Ok(())
    }
}
