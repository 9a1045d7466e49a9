//! Doclink API — HTTP front end for the description resolution service.

pub mod config;
pub mod error;
pub mod events;
pub mod messages;
pub mod routes;
pub mod state;

use axum::Router;

use crate::state::AppState;

/// Builds the full application router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1/errors", routes::errors::router())
        .with_state(state)
}
