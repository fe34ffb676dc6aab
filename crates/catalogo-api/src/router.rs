//! Axum router construction for the query API.
//!
//! Assembles the routes into a single [`Router`] with CORS middleware
//! enabled so the dashboard frontend can call the API cross-origin.

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router for the query API.
///
/// The router includes:
/// - `GET /` -- minimal HTML index page
/// - `GET /api/results` -- window results, newest first
/// - `GET /api/statistics` -- window statistics payload
///
/// CORS is configured to allow any origin for the dashboard. In
/// production this should be restricted.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Index page
        .route("/", get(handlers::index))
        // REST API
        .route("/api/results", get(handlers::get_results))
        .route("/api/statistics", get(handlers::get_statistics))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
