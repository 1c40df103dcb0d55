//! Router construction.
//!
//! Routes:
//! - `GET /health` - Liveness check
//! - `POST /render/:width/:height/:dpmm` - Render ZPL to PNG
//! - `GET /metrics` - Prometheus metrics
//! - `GET /docs`, `GET /api/docs/openapi.{yaml,json}` - API documentation

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Extension, Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers;
use crate::state::AppState;

/// Build the HTTP router.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health_handler))
        .route(
            "/render/:width/:height/:dpmm",
            post(handlers::render::render_handler),
        )
        .route("/metrics", get(handlers::metrics::metrics_handler))
        // Documentation
        .route("/docs", get(handlers::docs::swagger_ui_handler))
        .route(
            "/api/docs/openapi.yaml",
            get(handlers::docs::openapi_yaml_handler),
        )
        .route(
            "/api/docs/openapi.json",
            get(handlers::docs::openapi_json_handler),
        )
        // Middleware
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
