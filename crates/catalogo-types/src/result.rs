//! The persisted roulette outcome record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::color::Color;

/// A single classified roulette outcome.
///
/// Immutable once stored. `occurred_at` is the dedup key: no two results
/// may share the same instant, which is enforced by a uniqueness
/// constraint in the data layer. The store keeps instants in UTC;
/// calendar-day and hour-of-day logic converts to the civil zone at the
/// point of use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResult {
    /// Store-assigned identifier, monotonically increasing with
    /// insertion order (not necessarily with event time).
    pub id: i64,
    /// The raw roll value, expected in `[0, 14]`.
    pub number: i32,
    /// Color derived from `number` via [`classify`](crate::classify).
    pub color: Color,
    /// When the round occurred. Unique across all results.
    pub occurred_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify;

    #[test]
    fn serializes_with_lowercase_color() {
        let result = RoundResult {
            id: 1,
            number: 4,
            color: classify(4),
            occurred_at: Utc::now(),
        };
        let json = serde_json::to_value(&result).unwrap_or_default();
        assert_eq!(json["color"], "red");
        assert_eq!(json["number"], 4);
    }
}
