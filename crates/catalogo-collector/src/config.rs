//! Collector configuration.
//!
//! Loaded from environment variables with defaults matching the
//! upstream feed this catalog was built for. Every value can be
//! overridden without recompiling.

use std::time::Duration;

use crate::error::CollectorError;

/// Default upstream recent-results feed.
const DEFAULT_FEED_URL: &str =
    "https://blaze.bet.br/api/singleplayer-originals/originals/roulette_games/recent/1";

/// Default User-Agent sent with feed requests. The upstream rejects
/// requests carrying a default library agent, so a desktop browser
/// string is used.
const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// Default seconds between collection cycles.
const DEFAULT_POLL_INTERVAL_SECS: u64 = 7;

/// Collector configuration.
#[derive(Debug, Clone)]
pub struct CollectorConfig {
    /// Upstream recent-results feed URL.
    pub feed_url: String,
    /// User-Agent header sent with each fetch.
    pub user_agent: String,
    /// Fixed sleep between collection cycles. No drift compensation;
    /// cycles run sequentially so overlap cannot occur.
    pub poll_interval: Duration,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            feed_url: DEFAULT_FEED_URL.to_owned(),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            poll_interval: Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
        }
    }
}

impl CollectorConfig {
    /// Load configuration from environment variables.
    ///
    /// Optional variables:
    /// - `FEED_URL` -- upstream feed URL
    /// - `FEED_USER_AGENT` -- User-Agent header for feed requests
    /// - `POLL_INTERVAL_SECS` -- seconds between cycles (default 7)
    ///
    /// # Errors
    ///
    /// Returns [`CollectorError::Config`] if `POLL_INTERVAL_SECS` is
    /// present but not a valid integer.
    pub fn from_env() -> Result<Self, CollectorError> {
        let defaults = Self::default();

        let feed_url = std::env::var("FEED_URL").unwrap_or(defaults.feed_url);
        let user_agent = std::env::var("FEED_USER_AGENT").unwrap_or(defaults.user_agent);

        let poll_interval = match std::env::var("POLL_INTERVAL_SECS") {
            Ok(raw) => {
                let secs: u64 = raw.parse().map_err(|e| {
                    CollectorError::Config(format!("invalid POLL_INTERVAL_SECS {raw:?}: {e}"))
                })?;
                Duration::from_secs(secs)
            }
            Err(_) => defaults.poll_interval,
        };

        Ok(Self {
            feed_url,
            user_agent,
            poll_interval,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_upstream_feed() {
        let config = CollectorConfig::default();
        assert!(config.feed_url.contains("roulette_games/recent"));
        assert!(config.user_agent.starts_with("Mozilla/5.0"));
        assert_eq!(config.poll_interval, Duration::from_secs(7));
    }
}
