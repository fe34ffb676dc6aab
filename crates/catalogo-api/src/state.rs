//! Shared application state for the query API server.

use catalogo_db::PostgresPool;

/// Shared state for the Axum application.
///
/// Holds the explicitly constructed database pool handle. Wrapped in
/// [`Arc`](std::sync::Arc) and injected via Axum's `State` extractor;
/// there is no module-level connection singleton.
#[derive(Clone)]
pub struct AppState {
    /// Database pool shared with the collector.
    pub db: PostgresPool,
}

impl AppState {
    /// Create application state around a connected pool.
    pub const fn new(db: PostgresPool) -> Self {
        Self { db }
    }
}
