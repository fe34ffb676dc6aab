//! Error types for server startup.

use catalogo_collector::CollectorError;
use catalogo_db::DbError;

/// Errors that can stop the server from starting.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    /// A configuration value could not be read or parsed.
    #[error("configuration error: {0}")]
    Config(String),

    /// The database could not be reached or migrated.
    #[error(transparent)]
    Db(#[from] DbError),

    /// The collector configuration was invalid.
    #[error(transparent)]
    Collector(#[from] CollectorError),
}
