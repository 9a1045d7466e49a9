//! Doclink API server entry point.

use std::error::Error;
use std::net::SocketAddr;
use std::sync::Arc;

use doclink_core::event::EventFilter;
use doclink_core::repository::{CacheStore, DescriptionLookup};
use doclink_reporting::{DocsUrlProvider, ErrorReporter};
use doclink_resolution::ResolutionService;
use doclink_store::mapped_lookup::MappedDescriptionLookup;
use doclink_store::memory::InMemoryCacheStore;
use doclink_store::pg_cache_store::PgCacheStore;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use doclink_api::config::AppConfig;
use doclink_api::error::AppError;
use doclink_api::events::spawn_event_logger;
use doclink_api::messages::builtin_catalog;
use doclink_api::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting doclink API server");

    let config = AppConfig::from_env()?;

    let cache: Arc<dyn CacheStore> = match &config.database_url {
        Some(database_url) => {
            let pool = PgPoolOptions::new()
                .max_connections(10)
                .connect(database_url)
                .await
                .map_err(AppError::from)?;
            let store = PgCacheStore::new(pool);
            store.ensure_schema().await.map_err(AppError::from)?;
            tracing::info!("Using PostgreSQL cache store");
            Arc::new(store)
        }
        None => {
            tracing::info!("DATABASE_URL not set, using in-memory cache store");
            Arc::new(InMemoryCacheStore::new())
        }
    };

    let lookup: Arc<dyn DescriptionLookup> = match &config.error_codes_file {
        Some(path) => {
            let json = tokio::fs::read_to_string(path).await.map_err(|e| {
                AppError::Config(format!("cannot read {}: {e}", path.display()))
            })?;
            let lookup = MappedDescriptionLookup::from_json_str(&json).map_err(AppError::from)?;
            tracing::info!(
                codes = lookup.len(),
                path = %path.display(),
                "Loaded error code mapping"
            );
            Arc::new(lookup)
        }
        None => {
            tracing::warn!("ERROR_CODES_FILE not set, no error code will resolve on a cache miss");
            Arc::new(MappedDescriptionLookup::default())
        }
    };

    let service = Arc::new(
        ResolutionService::builder()
            .cache(cache)
            .lookup(lookup)
            .config(config.resolution.clone())
            .build()
            .map_err(AppError::from)?,
    );
    let event_logger = spawn_event_logger(service.events(EventFilter::All));

    let reporter = ErrorReporter::new(
        config.reporting_locale.clone(),
        Arc::new(DocsUrlProvider::new(config.docs_base_url.clone())),
        builtin_catalog().map_err(AppError::from)?,
    );
    let app_state = AppState::new(Arc::clone(&service), Arc::new(reporter));

    // TODO: Replace CorsLayer::permissive() with restricted origins for production.
    let app = doclink_api::build_router(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .map_err(|e| AppError::Config(format!("invalid HOST:PORT combination: {e}")))?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    service.dispose().await;
    let logged = event_logger.await?;
    tracing::info!(events = logged, "Resolution service disposed");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
