//! Pure computation core for the Catalogo roulette catalog.
//!
//! Two concerns live here, both free of I/O so they can be tested
//! without a database or a clock:
//!
//! - [`window`]: resolving a requested calendar date plus an optional
//!   trailing-hours filter into a concrete inclusive datetime range,
//!   anchored to the fixed civil timezone (America/Sao_Paulo).
//! - [`stats`]: deriving temporal aggregates (number histogram, hourly
//!   color breakdown, streak metrics) from an ordered slice of results.

pub mod stats;
pub mod window;

// Re-export primary types for convenience.
pub use stats::{compute_statistics, PeriodStatistics, SequenceStats};
pub use window::{resolve_window, resolve_window_now, ResolvedWindow, WindowError, CIVIL_TZ};
