//! Collaborator abstractions consumed by the resolution service.

use async_trait::async_trait;

use crate::code::{ErrorCode, InvocationContext};
use crate::error::ServiceError;
use crate::location::ErrorDescriptionLocation;

/// Key/value store for previously resolved description locations.
///
/// Only found locations are ever stored, so `Ok(None)` from `retrieve`
/// always means the key is absent.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Look up a cached location for `code`.
    async fn retrieve(
        &self,
        code: &ErrorCode,
    ) -> Result<Option<ErrorDescriptionLocation>, ServiceError>;

    /// Record `location` as the description for `code`.
    async fn store(
        &self,
        code: &ErrorCode,
        location: &ErrorDescriptionLocation,
    ) -> Result<(), ServiceError>;
}

/// Source of truth for description locations.
#[async_trait]
pub trait DescriptionLookup: Send + Sync {
    /// Attempt to discover a description location for `code`.
    async fn lookup(
        &self,
        code: &ErrorCode,
        context: &InvocationContext,
    ) -> Result<Option<ErrorDescriptionLocation>, ServiceError>;
}
