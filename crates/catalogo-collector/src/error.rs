//! Error types for the collector.

use catalogo_db::DbError;

/// Errors that can occur while collecting from the upstream feed.
#[derive(Debug, thiserror::Error)]
pub enum CollectorError {
    /// The upstream fetch failed (transport error or non-success
    /// status). Transient: the cycle is skipped, the loop continues.
    #[error("feed fetch failed: {0}")]
    Fetch(String),

    /// A configuration value could not be read or parsed.
    #[error("collector configuration error: {0}")]
    Config(String),

    /// A data layer operation failed.
    #[error(transparent)]
    Db(#[from] DbError),
}
