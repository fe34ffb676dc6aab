//! Server configuration loaded from environment variables.

use catalogo_api::ServerConfig;
use catalogo_collector::CollectorConfig;

use crate::error::StartupError;

/// Default API bind host.
const DEFAULT_API_HOST: &str = "0.0.0.0";

/// Default API bind port.
const DEFAULT_API_PORT: u16 = 8080;

/// Complete server configuration.
#[derive(Debug, Clone)]
pub struct ServerSettings {
    /// `PostgreSQL` connection URL.
    pub database_url: String,
    /// Query API bind configuration.
    pub api: ServerConfig,
    /// Collector loop configuration.
    pub collector: CollectorConfig,
}

impl ServerSettings {
    /// Load configuration from environment variables.
    ///
    /// Required variables:
    /// - `DATABASE_URL` -- `PostgreSQL` connection string
    ///
    /// Optional variables:
    /// - `API_HOST` -- bind address (default `0.0.0.0`)
    /// - `API_PORT` -- bind port (default 8080)
    /// - `FEED_URL`, `FEED_USER_AGENT`, `POLL_INTERVAL_SECS` -- see
    ///   [`CollectorConfig::from_env`]
    pub fn from_env() -> Result<Self, StartupError> {
        let database_url = std::env::var("DATABASE_URL")
            .map_err(|e| StartupError::Config(format!("missing required env var DATABASE_URL: {e}")))?;

        let host = std::env::var("API_HOST").unwrap_or_else(|_| DEFAULT_API_HOST.to_owned());
        let port: u16 = match std::env::var("API_PORT") {
            Ok(raw) => raw
                .parse()
                .map_err(|e| StartupError::Config(format!("invalid API_PORT {raw:?}: {e}")))?,
            Err(_) => DEFAULT_API_PORT,
        };

        let collector = CollectorConfig::from_env()?;

        Ok(Self {
            database_url,
            api: ServerConfig { host, port },
            collector,
        })
    }
}
