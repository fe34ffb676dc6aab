//! Query API server for the Catalogo roulette catalog.
//!
//! This crate provides an Axum HTTP server that exposes two read-only
//! endpoints over the result store:
//!
//! - **`GET /api/results`** -- the events of a resolved window, newest
//!   first
//! - **`GET /api/statistics`** -- the aggregate payload (histogram,
//!   hourly color breakdown, streaks) for a resolved window
//! - **Minimal HTML index** (`GET /`) listing the endpoints
//!
//! Both endpoints accept `date` (`YYYY-MM-DD`, default today) and
//! `time_filter_hours` query parameters; resolution rules live in
//! `catalogo-core`. Reads run concurrently with the collector's writes
//! against the shared connection pool.

pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod state;

// Re-export primary types for convenience.
pub use error::ApiError;
pub use router::build_router;
pub use server::{start_server, ServerConfig, ServerError};
pub use state::AppState;
