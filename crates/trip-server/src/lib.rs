//! Trip Server - HTTP backend for trip route generation and narration

pub mod api;
pub mod config;
pub mod state;

use axum::{middleware, Router};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;

/// Full application router with request-id, tracing and CORS layers.
pub fn app(state: Arc<AppState>) -> Router {
    api::routes()
        .with_state(state)
        .layer(middleware::from_fn(api::request_id::ensure_request_id))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
