//! Data layer for the Catalogo roulette catalog (`PostgreSQL`).
//!
//! `PostgreSQL` holds the single durable table of classified round
//! results. The collector writes through [`ResultStore::insert_if_absent`]
//! (dedup enforced by a uniqueness constraint on `occurred_at`) and the
//! query API reads ordered ranges through [`ResultStore::query_range`].
//!
//! Uses [`sqlx`] with runtime query construction (not compile-time
//! checked) to avoid requiring a live database at build time. All
//! queries are parameterized.
//!
//! # Modules
//!
//! - [`postgres`] -- connection pool configuration and handle
//! - [`result_store`] -- round result insertion and range queries
//! - [`error`] -- shared error type

pub mod error;
pub mod postgres;
pub mod result_store;

// Re-export primary types for convenience.
pub use error::DbError;
pub use postgres::{PostgresConfig, PostgresPool};
pub use result_store::{InsertOutcome, ResultStore, SortOrder};
