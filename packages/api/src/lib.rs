// ABOUTME: HTTP API layer for Speccraft providing REST endpoints and routing
// ABOUTME: Integration layer wiring the pipeline and history storage behind axum routes

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use speccraft_history::HistoryStorage;
use speccraft_pipeline::SpecPipeline;

pub mod auth;
pub mod error;
pub mod handlers;

pub use auth::CurrentUser;
pub use error::ApiError;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<SpecPipeline>,
    pub history: Arc<HistoryStorage>,
}

impl AppState {
    pub fn new(pipeline: SpecPipeline, history: HistoryStorage) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            history: Arc::new(history),
        }
    }
}

/// Creates the specification API router.
///
/// Every route requires an authenticated user; identity arrives from
/// the fronting auth layer and is attached by `auth::require_user`.
pub fn create_spec_router() -> Router<AppState> {
    Router::new()
        .route("/spec", post(handlers::generate_spec))
        .route("/refine/spec", post(handlers::refine_spec))
        .route("/history", get(handlers::get_history))
        .layer(middleware::from_fn(auth::require_user))
}
