//! REST API endpoint handlers for the query server.
//!
//! Both data endpoints follow the same read path: resolve the requested
//! window, query the store for that closed range, shape the response.
//! Window resolution happens before any database access, so a malformed
//! date is rejected without touching storage.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/` | Minimal HTML index page |
//! | `GET` | `/api/results` | Window results, newest first |
//! | `GET` | `/api/statistics` | Window statistics payload |

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::{Html, IntoResponse};
use axum::Json;
use catalogo_core::stats::PeriodStatistics;
use catalogo_core::{compute_statistics, resolve_window_now, ResolvedWindow, CIVIL_TZ};
use catalogo_db::{ResultStore, SortOrder};
use catalogo_types::RoundResult;
use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use crate::error::ApiError;
use crate::state::AppState;

/// Query parameters shared by both data endpoints.
#[derive(Debug, serde::Deserialize)]
pub struct RangeQuery {
    /// Calendar day to query, `YYYY-MM-DD`. Default: today in the
    /// civil timezone.
    pub date: Option<String>,
    /// Trailing-hours filter, only honored for today's date. Parsed
    /// leniently: non-numeric or non-positive values are ignored.
    pub time_filter_hours: Option<String>,
}

/// Response body of `GET /api/statistics`.
#[derive(Debug, Serialize)]
pub struct StatisticsResponse {
    /// The resolved calendar day, `YYYY-MM-DD`.
    pub date_requested: String,
    /// The trailing-hours filter, present only when it was in effect.
    pub time_filter_applied_hours: Option<i64>,
    /// The computed aggregates.
    #[serde(flatten)]
    pub stats: PeriodStatistics,
}

// ---------------------------------------------------------------------------
// GET / -- minimal HTML index
// ---------------------------------------------------------------------------

/// Serve a minimal HTML page listing the API endpoints.
pub async fn index() -> impl IntoResponse {
    Html(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>Catalogo</title>
</head>
<body>
    <h1>Catalogo</h1>
    <p>Roulette outcome catalog. All times are America/Sao_Paulo.</p>
    <ul>
        <li><a href="/api/results">/api/results</a> -- results for a day (?date=YYYY-MM-DD&amp;time_filter_hours=N)</li>
        <li><a href="/api/statistics">/api/statistics</a> -- statistics for a day (same parameters)</li>
    </ul>
</body>
</html>"#,
    )
}

// ---------------------------------------------------------------------------
// GET /api/results -- window results, newest first
// ---------------------------------------------------------------------------

/// Return every result in the resolved window, ordered descending by
/// time. Each entry carries the store id, the raw number, the color
/// name, and the timestamp rendered in the civil timezone.
pub async fn get_results(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RangeQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let window = resolve_window_now(params.date.as_deref(), params.time_filter_hours.as_deref())?;

    let store = ResultStore::new(state.db.pool());
    let results = store
        .query_range(
            window.start.with_timezone(&Utc),
            window.end.with_timezone(&Utc),
            SortOrder::Descending,
        )
        .await?;

    let body: Vec<serde_json::Value> = results.iter().map(result_json).collect();
    Ok(Json(body))
}

// ---------------------------------------------------------------------------
// GET /api/statistics -- window statistics
// ---------------------------------------------------------------------------

/// Compute and return the statistics payload for the resolved window.
///
/// The store is queried ascending because the streak metrics require
/// chronological order.
pub async fn get_statistics(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RangeQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let window = resolve_window_now(params.date.as_deref(), params.time_filter_hours.as_deref())?;

    let store = ResultStore::new(state.db.pool());
    let results = store
        .query_range(
            window.start.with_timezone(&Utc),
            window.end.with_timezone(&Utc),
            SortOrder::Ascending,
        )
        .await?;

    let stats = compute_statistics(&results);
    Ok(Json(statistics_response(&window, stats)))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Serialize one result for the listing endpoint.
fn result_json(result: &RoundResult) -> serde_json::Value {
    serde_json::json!({
        "id": result.id,
        "number": result.number,
        "color": result.color,
        "occurred_at": result
            .occurred_at
            .with_timezone(&CIVIL_TZ)
            .to_rfc3339_opts(SecondsFormat::Micros, false),
    })
}

/// Assemble the statistics response envelope around the computed stats.
fn statistics_response(window: &ResolvedWindow, stats: PeriodStatistics) -> StatisticsResponse {
    StatisticsResponse {
        date_requested: window.date.format("%Y-%m-%d").to_string(),
        time_filter_applied_hours: window.filter_hours,
        stats,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use catalogo_core::resolve_window;
    use catalogo_types::{classify, Color};
    use chrono::TimeZone;

    #[test]
    fn result_json_renders_civil_time() {
        // 18:30:12 UTC is 15:30:12 in Sao Paulo.
        let result = RoundResult {
            id: 5,
            number: 0,
            color: Color::White,
            occurred_at: Utc.with_ymd_and_hms(2024, 5, 10, 18, 30, 12).unwrap(),
        };
        let json = result_json(&result);
        assert_eq!(json["id"], 5);
        assert_eq!(json["color"], "white");
        assert_eq!(json["occurred_at"], "2024-05-10T15:30:12.000000-03:00");
    }

    #[test]
    fn statistics_envelope_reports_applied_filter_only() {
        let now = CIVIL_TZ.with_ymd_and_hms(2024, 5, 10, 15, 30, 0).unwrap();
        let stats = compute_statistics(&[]);

        let filtered = resolve_window(Some("2024-05-10"), Some("2"), now).unwrap();
        let response = statistics_response(&filtered, stats.clone());
        assert_eq!(response.date_requested, "2024-05-10");
        assert_eq!(response.time_filter_applied_hours, Some(2));

        let past_day = resolve_window(Some("2024-05-09"), Some("2"), now).unwrap();
        let response = statistics_response(&past_day, stats);
        assert_eq!(response.date_requested, "2024-05-09");
        assert_eq!(response.time_filter_applied_hours, None);
    }

    #[test]
    fn statistics_envelope_flattens_stats_fields() {
        let now = CIVIL_TZ.with_ymd_and_hms(2024, 5, 10, 15, 30, 0).unwrap();
        let window = resolve_window(None, None, now).unwrap();
        let results = vec![RoundResult {
            id: 1,
            number: 3,
            color: classify(3),
            occurred_at: now.with_timezone(&Utc),
        }];
        let response = statistics_response(&window, compute_statistics(&results));
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["date_requested"], "2024-05-10");
        assert_eq!(json["total_results_in_period"], 1);
        assert_eq!(json["number_counts"]["3"], 1);
        assert!(json["sequence_stats"].is_object());
    }
}
