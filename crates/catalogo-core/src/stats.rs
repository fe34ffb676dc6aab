//! Statistics computation over an ordered slice of results.
//!
//! [`compute_statistics`] consumes the results of one resolved window in
//! ascending chronological order (required for the streak metrics) and
//! produces the aggregate payload served by `GET /api/statistics`:
//! total counts, a zero-filled per-number histogram, an hourly color
//! breakdown with percentages, and longest-streak metrics.

use std::collections::BTreeMap;

use catalogo_types::{Color, RoundResult};
use chrono::Timelike;
use serde::Serialize;

use crate::window::CIVIL_TZ;

/// Highest valid roll number; the histogram covers `0..=MAX_NUMBER`.
const MAX_NUMBER: i32 = 14;

/// Count and share of one color within one civil hour.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ColorSlot {
    /// Occurrences of the color in the hour.
    pub count: u32,
    /// `count / total_results_in_hour * 100`, rounded to 2 decimals.
    pub percentage: f64,
}

/// Per-hour color distribution.
///
/// Colors with zero occurrences in the hour still appear with count 0;
/// hours with no results at all are omitted from the breakdown map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HourlyColorStats {
    /// Every result that fell in the hour, unknown included.
    pub total_results_in_hour: u32,
    /// Breakdown over the three expected colors.
    pub colors: ColorBreakdown,
}

/// The three expected colors of an hourly breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ColorBreakdown {
    /// Red count and share.
    pub red: ColorSlot,
    /// Black count and share.
    pub black: ColorSlot,
    /// White count and share.
    pub white: ColorSlot,
}

/// Longest-streak metrics over the chronological sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SequenceStats {
    /// Longest run of consecutive red results.
    pub longest_red_streak: u32,
    /// Longest run of consecutive black results.
    pub longest_black_streak: u32,
    /// Longest run of consecutive white results.
    pub longest_white_streak: u32,
    /// Longest run of consecutive non-white results.
    pub longest_streak_without_white: u32,
}

/// Aggregates computed for one resolved window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodStatistics {
    /// Number of results in the window.
    pub total_results_in_period: u64,
    /// Number of white results in the window.
    pub total_whites_in_period: u64,
    /// Occurrence count per roll number, keyed `"0"` through `"14"`.
    /// All 15 keys are always present, zero-filled.
    pub number_counts: BTreeMap<String, u64>,
    /// Hourly color distribution, keyed by two-digit civil hour
    /// (`"00"`–`"23"`), ascending. Only hours with results appear.
    pub color_stats_hourly: BTreeMap<String, HourlyColorStats>,
    /// Longest-streak metrics.
    pub sequence_stats: SequenceStats,
}

/// Raw per-hour accumulator before percentages are derived.
#[derive(Debug, Clone, Copy, Default)]
struct HourAccumulator {
    total: u32,
    red: u32,
    black: u32,
    white: u32,
}

/// Compute the full statistics payload for one window.
///
/// `results` must be in ascending `occurred_at` order; the streak
/// metrics are meaningless otherwise. Hour-of-day is taken in the civil
/// timezone, matching the window boundaries.
pub fn compute_statistics(results: &[RoundResult]) -> PeriodStatistics {
    let mut number_counts: BTreeMap<String, u64> =
        (0..=MAX_NUMBER).map(|n| (n.to_string(), 0)).collect();
    let mut hours: BTreeMap<u32, HourAccumulator> = BTreeMap::new();
    let mut total_whites: u64 = 0;

    let mut max_red = 0u32;
    let mut max_black = 0u32;
    let mut max_white = 0u32;
    let mut max_without_white = 0u32;
    let mut cur_red = 0u32;
    let mut cur_black = 0u32;
    let mut cur_white = 0u32;
    let mut cur_without_white = 0u32;

    for result in results {
        // Only the keys 0..=14 exist, so out-of-range numbers are
        // absent from the histogram by construction.
        if let Some(count) = number_counts.get_mut(&result.number.to_string()) {
            *count += 1;
        }

        let hour = result.occurred_at.with_timezone(&CIVIL_TZ).hour();
        let acc = hours.entry(hour).or_default();
        acc.total += 1;
        match result.color {
            Color::Red => {
                acc.red += 1;
                cur_red += 1;
                max_red = max_red.max(cur_red);
                cur_black = 0;
                cur_white = 0;
            }
            Color::Black => {
                acc.black += 1;
                cur_black += 1;
                max_black = max_black.max(cur_black);
                cur_red = 0;
                cur_white = 0;
            }
            Color::White => {
                acc.white += 1;
                total_whites += 1;
                cur_white += 1;
                max_white = max_white.max(cur_white);
                cur_red = 0;
                cur_black = 0;
            }
            Color::Unknown => {
                cur_red = 0;
                cur_black = 0;
                cur_white = 0;
            }
        }

        if result.color.is_white() {
            // A white closes the current non-white run.
            max_without_white = max_without_white.max(cur_without_white);
            cur_without_white = 0;
        } else {
            cur_without_white += 1;
        }
    }
    // The final open run still counts.
    max_without_white = max_without_white.max(cur_without_white);

    let color_stats_hourly = hours
        .into_iter()
        .map(|(hour, acc)| (format!("{hour:02}"), hourly_stats(&acc)))
        .collect();

    PeriodStatistics {
        total_results_in_period: u64::try_from(results.len()).unwrap_or(u64::MAX),
        total_whites_in_period: total_whites,
        number_counts,
        color_stats_hourly,
        sequence_stats: SequenceStats {
            longest_red_streak: max_red,
            longest_black_streak: max_black,
            longest_white_streak: max_white,
            longest_streak_without_white: max_without_white,
        },
    }
}

/// Derive the serialized hourly stats from a raw accumulator.
fn hourly_stats(acc: &HourAccumulator) -> HourlyColorStats {
    HourlyColorStats {
        total_results_in_hour: acc.total,
        colors: ColorBreakdown {
            red: color_slot(acc.red, acc.total),
            black: color_slot(acc.black, acc.total),
            white: color_slot(acc.white, acc.total),
        },
    }
}

/// Build one color slot with its percentage of the hour.
fn color_slot(count: u32, total: u32) -> ColorSlot {
    let percentage = if total == 0 {
        0.0
    } else {
        round2(f64::from(count) / f64::from(total) * 100.0)
    };
    ColorSlot { count, percentage }
}

/// Round to 2 decimal places.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::float_cmp,
    clippy::indexing_slicing,
    clippy::cast_possible_truncation
)]
mod tests {
    use super::*;
    use catalogo_types::classify;
    use chrono::{DateTime, TimeZone, Utc};
    use chrono_tz::Tz;

    /// A result at the given civil hour/minute on a fixed day.
    fn at(number: i32, hour: u32, minute: u32, second: u32) -> RoundResult {
        let local: DateTime<Tz> = CIVIL_TZ
            .with_ymd_and_hms(2024, 5, 10, hour, minute, second)
            .unwrap();
        RoundResult {
            id: 0,
            number,
            color: classify(number),
            occurred_at: local.with_timezone(&Utc),
        }
    }

    #[test]
    fn empty_window_is_all_zero() {
        let stats = compute_statistics(&[]);
        assert_eq!(stats.total_results_in_period, 0);
        assert_eq!(stats.total_whites_in_period, 0);
        assert_eq!(stats.number_counts.len(), 15);
        assert!(stats.number_counts.values().all(|&c| c == 0));
        assert!(stats.color_stats_hourly.is_empty());
        assert_eq!(stats.sequence_stats, SequenceStats::default());
    }

    #[test]
    fn histogram_has_all_fifteen_keys_and_sums_to_total() {
        let results: Vec<RoundResult> =
            [3, 3, 0, 14, 7, 7, 7].iter().enumerate().map(|(i, &n)| at(n, 12, 0, i as u32)).collect();
        let stats = compute_statistics(&results);
        assert_eq!(stats.number_counts.len(), 15);
        assert_eq!(stats.number_counts["3"], 2);
        assert_eq!(stats.number_counts["7"], 3);
        assert_eq!(stats.number_counts["0"], 1);
        assert_eq!(stats.number_counts["14"], 1);
        let sum: u64 = stats.number_counts.values().sum();
        assert_eq!(sum, stats.total_results_in_period);
    }

    #[test]
    fn hourly_breakdown_counts_and_percentages() {
        // Hour 10: red, red, black. Hour 11: white. Hour 09: nothing.
        let results = vec![at(1, 10, 0, 0), at(2, 10, 5, 0), at(9, 10, 10, 0), at(0, 11, 0, 0)];
        let stats = compute_statistics(&results);

        let ten = &stats.color_stats_hourly["10"];
        assert_eq!(ten.total_results_in_hour, 3);
        assert_eq!(ten.colors.red.count, 2);
        assert_eq!(ten.colors.red.percentage, 66.67);
        assert_eq!(ten.colors.black.count, 1);
        assert_eq!(ten.colors.black.percentage, 33.33);
        assert_eq!(ten.colors.white.count, 0);
        assert_eq!(ten.colors.white.percentage, 0.0);

        let eleven = &stats.color_stats_hourly["11"];
        assert_eq!(eleven.total_results_in_hour, 1);
        assert_eq!(eleven.colors.white.percentage, 100.0);

        assert!(!stats.color_stats_hourly.contains_key("09"));
    }

    #[test]
    fn hourly_keys_are_two_digit_and_sorted() {
        let results = vec![at(1, 9, 0, 0), at(1, 23, 0, 0), at(1, 0, 0, 0)];
        let stats = compute_statistics(&results);
        let keys: Vec<&str> = stats.color_stats_hourly.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["00", "09", "23"]);
    }

    #[test]
    fn streaks_follow_chronological_runs() {
        // red, red, white, black, black, black
        let results = vec![
            at(1, 12, 0, 0),
            at(2, 12, 0, 10),
            at(0, 12, 0, 20),
            at(8, 12, 0, 30),
            at(9, 12, 0, 40),
            at(10, 12, 0, 50),
        ];
        let stats = compute_statistics(&results);
        assert_eq!(stats.sequence_stats.longest_red_streak, 2);
        assert_eq!(stats.sequence_stats.longest_black_streak, 3);
        assert_eq!(stats.sequence_stats.longest_white_streak, 1);
        // The trailing black run is the longest without a white.
        assert_eq!(stats.sequence_stats.longest_streak_without_white, 3);
        assert_eq!(stats.total_whites_in_period, 1);
    }

    #[test]
    fn unknown_breaks_color_streaks_but_not_the_non_white_run() {
        // red, red, unknown, red: the unknown resets the red run yet
        // still extends the non-white run.
        let results = vec![at(1, 12, 0, 0), at(2, 12, 0, 10), at(99, 12, 0, 20), at(3, 12, 0, 30)];
        let stats = compute_statistics(&results);
        assert_eq!(stats.sequence_stats.longest_red_streak, 2);
        assert_eq!(stats.sequence_stats.longest_streak_without_white, 4);
    }

    #[test]
    fn out_of_range_numbers_do_not_appear_in_histogram() {
        let results = vec![at(99, 12, 0, 0), at(-1, 12, 0, 10)];
        let stats = compute_statistics(&results);
        assert_eq!(stats.number_counts.len(), 15);
        let sum: u64 = stats.number_counts.values().sum();
        assert_eq!(sum, 0);
        // They still count toward the period and hour totals.
        assert_eq!(stats.total_results_in_period, 2);
        assert_eq!(stats.color_stats_hourly["12"].total_results_in_hour, 2);
    }

    #[test]
    fn hour_of_day_is_civil_not_utc() {
        // 10:00 in Sao Paulo is 13:00 UTC; the breakdown must key on 10.
        let result = at(5, 10, 0, 0);
        assert_eq!(result.occurred_at.hour(), 13);
        let stats = compute_statistics(&[result]);
        assert!(stats.color_stats_hourly.contains_key("10"));
    }

    #[test]
    fn serialized_shape_matches_api_contract() {
        let stats = compute_statistics(&[at(1, 10, 0, 0)]);
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["total_results_in_period"], 1);
        assert_eq!(json["color_stats_hourly"]["10"]["colors"]["red"]["count"], 1);
        assert_eq!(json["sequence_stats"]["longest_red_streak"], 1);
        assert_eq!(json["number_counts"]["1"], 1);
    }
}
