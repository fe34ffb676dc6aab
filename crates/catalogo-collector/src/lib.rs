//! Upstream feed collector for the Catalogo roulette catalog.
//!
//! The collector polls the upstream "recent results" feed on a fixed
//! cadence, classifies each record, and writes it through the data
//! layer's dedup-on-write insert. Because the dedup key is the event
//! time, re-fetching overlapping batches (the feed always returns the
//! most recent rounds, seen or not) is always safe.
//!
//! Failure isolation: a failed fetch skips the cycle, an incomplete
//! record skips the record, a storage fault loses at most one record.
//! None of them stop the loop; only the shutdown signal does.

pub mod collector;
pub mod config;
pub mod error;
pub mod feed;

// Re-export primary types for convenience.
pub use collector::run_collector;
pub use config::CollectorConfig;
pub use error::CollectorError;
pub use feed::{FeedClient, FeedRecord};
