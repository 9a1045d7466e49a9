//! Integration tests for `PgCacheStore`.
//!
//! These need a reachable `PostgreSQL` instance named by `DATABASE_URL`.

use doclink_core::code::ErrorCode;
use doclink_core::repository::CacheStore;
use doclink_store::pg_cache_store::PgCacheStore;
use doclink_test_support::location_for;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_retrieve_returns_none_for_unknown_code(pool: PgPool) {
    let store = PgCacheStore::new(pool);

    let result = store.retrieve(&ErrorCode::new("unknown")).await.unwrap();

    assert!(result.is_none());
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_store_and_retrieve_round_trip(pool: PgPool) {
    let store = PgCacheStore::new(pool);
    let code = ErrorCode::new("1jwqa");

    store.store(&code, &location_for(&code)).await.unwrap();

    assert_eq!(
        store.retrieve(&code).await.unwrap(),
        Some(location_for(&code))
    );
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_store_upserts_existing_code(pool: PgPool) {
    let store = PgCacheStore::new(pool);
    let code = ErrorCode::new("moved");

    store
        .store(&code, &location_for(&ErrorCode::new("old")))
        .await
        .unwrap();
    store.store(&code, &location_for(&code)).await.unwrap();

    assert_eq!(
        store.retrieve(&code).await.unwrap(),
        Some(location_for(&code))
    );
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_ensure_schema_is_idempotent(pool: PgPool) {
    let store = PgCacheStore::new(pool);

    store.ensure_schema().await.unwrap();
    store.ensure_schema().await.unwrap();
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_store_and_retrieve_long_code(pool: PgPool) {
    let store = PgCacheStore::new(pool);
    let code = ErrorCode::new("x".repeat(300));

    store.store(&code, &location_for(&code)).await.unwrap();

    assert_eq!(
        store.retrieve(&code).await.unwrap(),
        Some(location_for(&code))
    );
}
