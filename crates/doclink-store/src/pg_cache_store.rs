//! `PostgreSQL` implementation of the `CacheStore` trait.

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::types::Json;
use tracing::{debug, instrument};

use doclink_core::code::ErrorCode;
use doclink_core::error::ServiceError;
use doclink_core::location::ErrorDescriptionLocation;
use doclink_core::repository::CacheStore;

use crate::schema::CREATE_LOCATIONS_TABLE;

/// PostgreSQL-backed description location cache.
#[derive(Debug, Clone)]
pub struct PgCacheStore {
    pool: PgPool,
}

impl PgCacheStore {
    /// Creates a new `PgCacheStore`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates the cache table if it does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::CacheStore` if the DDL fails.
    pub async fn ensure_schema(&self) -> Result<(), ServiceError> {
        sqlx::raw_sql(CREATE_LOCATIONS_TABLE)
            .execute(&self.pool)
            .await
            .map_err(to_service_error)?;
        Ok(())
    }
}

fn to_service_error(err: sqlx::Error) -> ServiceError {
    ServiceError::CacheStore(err.to_string())
}

#[async_trait]
impl CacheStore for PgCacheStore {
    #[instrument(skip(self), fields(error_code = %code))]
    async fn retrieve(
        &self,
        code: &ErrorCode,
    ) -> Result<Option<ErrorDescriptionLocation>, ServiceError> {
        let row: Option<(Json<ErrorDescriptionLocation>,)> = sqlx::query_as(
            "SELECT location FROM error_description_locations WHERE error_code = $1",
        )
        .bind(code.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(to_service_error)?;

        Ok(row.map(|(Json(location),)| location))
    }

    #[instrument(skip(self, location), fields(error_code = %code))]
    async fn store(
        &self,
        code: &ErrorCode,
        location: &ErrorDescriptionLocation,
    ) -> Result<(), ServiceError> {
        sqlx::query(
            r"
            INSERT INTO error_description_locations (error_code, location, stored_at)
            VALUES ($1, $2, NOW())
            ON CONFLICT (error_code)
            DO UPDATE SET location = EXCLUDED.location, stored_at = EXCLUDED.stored_at
            ",
        )
        .bind(code.as_str())
        .bind(Json(location))
        .execute(&self.pool)
        .await
        .map_err(to_service_error)?;

        debug!("stored description location");
        Ok(())
    }
}
