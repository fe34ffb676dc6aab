//! Query time-window resolution.
//!
//! Every query names a calendar day (defaulting to "today") and may ask
//! for only the trailing N hours of it. [`resolve_window`] turns that
//! pair into a concrete closed `[start, end]` range in the fixed civil
//! timezone.
//!
//! The trailing-hours filter is only meaningful for today: for any other
//! date the full-day range is returned regardless of the filter value.
//! That asymmetry is deliberate policy: a past day is complete, so
//! "the last N hours" has no anchor.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

/// The fixed civil timezone all calendar-day and hour-of-day boundaries
/// are interpreted in.
pub const CIVIL_TZ: Tz = chrono_tz::America::Sao_Paulo;

/// Date format accepted from query parameters.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Errors from window resolution.
#[derive(Debug, thiserror::Error)]
pub enum WindowError {
    /// The `date` query parameter could not be parsed as `YYYY-MM-DD`.
    #[error("invalid date format: {0:?} (expected YYYY-MM-DD)")]
    InvalidDateFormat(String),
}

/// A resolved inclusive query range in the civil timezone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedWindow {
    /// The calendar day the query is about.
    pub date: NaiveDate,
    /// First instant of the range (inclusive).
    pub start: DateTime<Tz>,
    /// Last instant of the range (inclusive).
    pub end: DateTime<Tz>,
    /// The trailing-hours filter, present only when it was actually
    /// applied (today's date and a positive hour count).
    pub filter_hours: Option<i64>,
}

/// Resolve a query window against an explicit "now".
///
/// `date` is an optional `YYYY-MM-DD` string; omitted means today in
/// [`CIVIL_TZ`]. `trailing_hours` is parsed leniently: a missing,
/// non-numeric, or non-positive value means no filter, never an error.
///
/// When the filter applies, `start` is `now - trailing_hours` clamped
/// upward to the start of the day so the range never crosses into the
/// previous day; `end` is `now`. Otherwise the range spans the whole
/// day, ending at the last representable instant (`23:59:59.999999`).
///
/// # Errors
///
/// Returns [`WindowError::InvalidDateFormat`] if `date` is present but
/// malformed.
pub fn resolve_window(
    date: Option<&str>,
    trailing_hours: Option<&str>,
    now: DateTime<Tz>,
) -> Result<ResolvedWindow, WindowError> {
    let date = match date {
        Some(s) => NaiveDate::parse_from_str(s, DATE_FORMAT)
            .map_err(|_| WindowError::InvalidDateFormat(s.to_owned()))?,
        None => now.date_naive(),
    };

    let is_today = date == now.date_naive();
    let hours = trailing_hours
        .and_then(|s| s.trim().parse::<i64>().ok())
        .unwrap_or(0);

    let day_start = start_of_day(date);

    if is_today && hours > 0 {
        // Overflowing subtractions degrade to the day-start clamp.
        let candidate = Duration::try_hours(hours)
            .and_then(|d| now.checked_sub_signed(d))
            .unwrap_or(day_start);
        let start = if candidate < day_start {
            day_start
        } else {
            candidate
        };
        tracing::debug!(%start, end = %now, hours, "trailing-hours window resolved");
        Ok(ResolvedWindow {
            date,
            start,
            end: now,
            filter_hours: Some(hours),
        })
    } else {
        let end = end_of_day(date);
        tracing::debug!(%day_start, %end, %date, "full-day window resolved");
        Ok(ResolvedWindow {
            date,
            start: day_start,
            end,
            filter_hours: None,
        })
    }
}

/// Resolve a query window against the current wall clock.
///
/// # Errors
///
/// Returns [`WindowError::InvalidDateFormat`] if `date` is present but
/// malformed.
pub fn resolve_window_now(
    date: Option<&str>,
    trailing_hours: Option<&str>,
) -> Result<ResolvedWindow, WindowError> {
    resolve_window(date, trailing_hours, Utc::now().with_timezone(&CIVIL_TZ))
}

/// First instant of `date` in the civil timezone.
fn start_of_day(date: NaiveDate) -> DateTime<Tz> {
    to_civil(date.and_time(NaiveTime::MIN))
}

/// Last representable instant of `date` in the civil timezone.
fn end_of_day(date: NaiveDate) -> DateTime<Tz> {
    let last = NaiveTime::from_hms_micro_opt(23, 59, 59, 999_999).unwrap_or(NaiveTime::MIN);
    to_civil(date.and_time(last))
}

/// Attach the civil timezone to a naive local datetime.
///
/// São Paulo has had a fixed -03:00 offset since 2019, but historical
/// DST transitions can make a local time ambiguous (fall-back) or
/// nonexistent (spring-forward, which skipped midnight in Brazil).
fn to_civil(naive: NaiveDateTime) -> DateTime<Tz> {
    match naive.and_local_timezone(CIVIL_TZ) {
        chrono::LocalResult::Single(dt) | chrono::LocalResult::Ambiguous(dt, _) => dt,
        // The skipped hour: resume at the first instant that does exist.
        // Standard offset is -03:00, so local midnight is 03:00 UTC.
        chrono::LocalResult::None => CIVIL_TZ.from_utc_datetime(&(naive + Duration::hours(3))),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Timelike;

    fn civil(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Tz> {
        CIVIL_TZ.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    #[test]
    fn omitted_date_defaults_to_today_full_day() {
        let now = civil(2024, 5, 10, 15, 30, 0);
        let w = resolve_window(None, None, now).unwrap();
        assert_eq!(w.date, NaiveDate::from_ymd_opt(2024, 5, 10).unwrap());
        assert_eq!(w.start, civil(2024, 5, 10, 0, 0, 0));
        assert_eq!(w.end.time().hour(), 23);
        assert_eq!(w.end.time().minute(), 59);
        assert_eq!(w.filter_hours, None);
    }

    #[test]
    fn trailing_hours_applies_for_today() {
        let now = civil(2024, 5, 10, 15, 30, 0);
        let w = resolve_window(Some("2024-05-10"), Some("2"), now).unwrap();
        assert_eq!(w.start, civil(2024, 5, 10, 13, 30, 0));
        assert_eq!(w.end, now);
        assert_eq!(w.filter_hours, Some(2));
    }

    #[test]
    fn trailing_hours_clamps_to_start_of_day() {
        let now = civil(2024, 5, 10, 5, 0, 0);
        let w = resolve_window(Some("2024-05-10"), Some("20"), now).unwrap();
        assert_eq!(w.start, civil(2024, 5, 10, 0, 0, 0));
        assert_eq!(w.end, now);
        assert_eq!(w.filter_hours, Some(20));
    }

    #[test]
    fn trailing_hours_ignored_for_past_dates() {
        let now = civil(2024, 5, 10, 15, 30, 0);
        let w = resolve_window(Some("2024-05-09"), Some("2"), now).unwrap();
        assert_eq!(w.start, civil(2024, 5, 9, 0, 0, 0));
        assert_eq!(w.end.date_naive(), NaiveDate::from_ymd_opt(2024, 5, 9).unwrap());
        assert_eq!(w.filter_hours, None);
    }

    #[test]
    fn non_numeric_hours_treated_as_absent() {
        let now = civil(2024, 5, 10, 15, 30, 0);
        let w = resolve_window(Some("2024-05-10"), Some("abc"), now).unwrap();
        assert_eq!(w.filter_hours, None);
        assert_eq!(w.start, civil(2024, 5, 10, 0, 0, 0));
    }

    #[test]
    fn non_positive_hours_treated_as_absent() {
        let now = civil(2024, 5, 10, 15, 30, 0);
        for hours in ["0", "-3"] {
            let w = resolve_window(Some("2024-05-10"), Some(hours), now).unwrap();
            assert_eq!(w.filter_hours, None, "hours {hours} should not apply");
        }
    }

    #[test]
    fn huge_hours_degrades_to_day_start() {
        let now = civil(2024, 5, 10, 15, 30, 0);
        let huge = i64::MAX.to_string();
        let w = resolve_window(Some("2024-05-10"), Some(huge.as_str()), now).unwrap();
        assert_eq!(w.start, civil(2024, 5, 10, 0, 0, 0));
    }

    #[test]
    fn malformed_date_is_rejected() {
        let now = civil(2024, 5, 10, 15, 30, 0);
        let err = resolve_window(Some("2024-13-40"), None, now).unwrap_err();
        assert!(matches!(err, WindowError::InvalidDateFormat(_)));
    }

    #[test]
    fn end_of_day_carries_microsecond_precision() {
        let now = civil(2024, 5, 10, 15, 30, 0);
        let w = resolve_window(Some("2024-05-09"), None, now).unwrap();
        assert_eq!(w.end.time().nanosecond(), 999_999_000);
    }

    #[test]
    fn dst_spring_forward_midnight_resolves() {
        // 2018-11-04: Brazilian DST skipped midnight (clocks jumped
        // straight to 01:00). The day must still resolve to a range.
        let now = civil(2024, 5, 10, 15, 30, 0);
        let w = resolve_window(Some("2018-11-04"), None, now).unwrap();
        assert!(w.start < w.end);
        assert_eq!(w.start.date_naive(), NaiveDate::from_ymd_opt(2018, 11, 4).unwrap());
    }
}
