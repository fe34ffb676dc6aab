//! Shared type definitions for the Catalogo roulette catalog.
//!
//! This crate holds the domain vocabulary used by every other crate in the
//! workspace: the [`Color`] classification of a roll, the [`classify`]
//! function that derives it, and the [`RoundResult`] record persisted by
//! the data layer.

pub mod color;
pub mod result;

// Re-export primary types for convenience.
pub use color::{classify, Color};
pub use result::RoundResult;
