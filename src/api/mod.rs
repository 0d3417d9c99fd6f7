// src/api/mod.rs

pub mod handlers;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post, put};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// All routes live under /calculator, matching the service's public
/// surface.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/calculator/health", get(handlers::health))
        .route("/calculator/stack/size", get(handlers::stack_size))
        .route(
            "/calculator/stack/arguments",
            put(handlers::push_arguments).delete(handlers::remove_arguments),
        )
        .route("/calculator/stack/operate", get(handlers::operate))
        .route("/calculator/independent/calculate", post(handlers::calculate))
        .route("/calculator/history", get(handlers::history))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
