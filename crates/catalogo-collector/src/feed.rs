//! Upstream feed client and record parsing.
//!
//! The feed is consumed as a list of untyped JSON records; only `roll`
//! and `created_at` are required, and their absence is tolerated
//! per-record rather than failing the batch. Timestamps arrive as UTC
//! strings with fractional-second precision in a fixed textual layout.
//!
//! No request timeout is configured on the fetch; the upstream defines
//! no latency bound and the design deliberately inherits that gap
//! rather than inventing one.

use chrono::{DateTime, NaiveDateTime, Utc};
use reqwest::header::USER_AGENT;
use serde::Deserialize;

use crate::config::CollectorConfig;
use crate::error::CollectorError;

/// Textual layout of feed timestamps, e.g. `2024-05-10T18:30:12.345678Z`.
const FEED_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.fZ";

/// One record from the upstream recent-results feed.
///
/// The wire format is treated as untyped and unstable: unknown fields
/// are ignored and required fields are optional at the parsing layer so
/// a malformed record never fails the whole batch.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedRecord {
    /// The raw roll value, expected in `[0, 14]`.
    #[serde(default)]
    pub roll: Option<i32>,
    /// UTC timestamp string of the round.
    #[serde(default)]
    pub created_at: Option<String>,
}

/// HTTP client for the upstream feed.
pub struct FeedClient {
    client: reqwest::Client,
    url: String,
    user_agent: String,
}

impl FeedClient {
    /// Create a new feed client from the collector configuration.
    pub fn new(config: &CollectorConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: config.feed_url.clone(),
            user_agent: config.user_agent.clone(),
        }
    }

    /// Fetch one batch of recent records from the feed.
    ///
    /// The batch may overlap with previously fetched batches; the
    /// caller relies on the store's dedup to make that safe.
    ///
    /// # Errors
    ///
    /// Returns [`CollectorError::Fetch`] on transport failure, a
    /// non-success status, or an unparseable body.
    pub async fn fetch_recent(&self) -> Result<Vec<FeedRecord>, CollectorError> {
        let response = self
            .client
            .get(&self.url)
            .header(USER_AGENT, &self.user_agent)
            .send()
            .await
            .map_err(|e| CollectorError::Fetch(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CollectorError::Fetch(format!("feed returned {status}")));
        }

        response
            .json::<Vec<FeedRecord>>()
            .await
            .map_err(|e| CollectorError::Fetch(format!("response parse failed: {e}")))
    }
}

/// Parse a feed timestamp string into a UTC instant.
///
/// Returns `None` for anything that does not match the fixed layout;
/// the caller logs and skips the record.
pub fn parse_feed_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(raw, FEED_TIME_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn parses_feed_timestamp_with_microseconds() {
        let parsed = parse_feed_timestamp("2024-05-10T18:30:12.345678Z").unwrap();
        assert_eq!(parsed.hour(), 18);
        assert_eq!(parsed.nanosecond(), 345_678_000);
    }

    #[test]
    fn rejects_malformed_timestamp() {
        assert!(parse_feed_timestamp("10/05/2024 18:30").is_none());
        assert!(parse_feed_timestamp("").is_none());
    }

    #[test]
    fn record_tolerates_missing_fields() {
        let record: FeedRecord = serde_json::from_str("{}").unwrap();
        assert!(record.roll.is_none());
        assert!(record.created_at.is_none());
    }

    #[test]
    fn record_ignores_unknown_fields() {
        let json = r#"{"id":"abc","color":2,"roll":9,"created_at":"2024-05-10T18:30:12.345678Z"}"#;
        let record: FeedRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.roll, Some(9));
        assert!(record.created_at.is_some());
    }
}
