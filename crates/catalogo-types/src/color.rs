//! Color classification of roulette rolls.
//!
//! The wheel has 15 slots: 0 is white, 1 through 7 are red, 8 through 14
//! are black. [`classify`] is total over all integers so an out-of-range
//! value coming from the upstream feed can never panic the pipeline; it
//! maps to [`Color::Unknown`] instead.

use serde::{Deserialize, Serialize};

/// Derived color classification of a roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    /// Rolls 1 through 7.
    Red,
    /// Rolls 8 through 14.
    Black,
    /// Roll 0.
    White,
    /// Any roll outside `[0, 14]`. The upstream feed should never emit
    /// one, but the classifier must not fail if it does.
    Unknown,
}

/// Classify a raw roll number into its [`Color`].
///
/// Total function: every integer maps to a variant, no failure path.
pub const fn classify(number: i32) -> Color {
    match number {
        0 => Color::White,
        1..=7 => Color::Red,
        8..=14 => Color::Black,
        _ => Color::Unknown,
    }
}

impl Color {
    /// The lowercase name stored in the database and used in API payloads.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Black => "black",
            Self::White => "white",
            Self::Unknown => "unknown",
        }
    }

    /// Parse a stored color name back into a [`Color`].
    ///
    /// Unrecognized names fall back to [`Color::Unknown`] rather than
    /// erroring, matching the defensive posture of [`classify`].
    pub fn from_name(name: &str) -> Self {
        match name {
            "red" => Self::Red,
            "black" => Self::Black,
            "white" => Self::White,
            _ => Self::Unknown,
        }
    }

    /// Whether this is the white slot.
    pub const fn is_white(self) -> bool {
        matches!(self, Self::White)
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_red_range() {
        for n in 1..=7 {
            assert_eq!(classify(n), Color::Red, "roll {n} should be red");
        }
    }

    #[test]
    fn classify_black_range() {
        for n in 8..=14 {
            assert_eq!(classify(n), Color::Black, "roll {n} should be black");
        }
    }

    #[test]
    fn classify_zero_is_white() {
        assert_eq!(classify(0), Color::White);
    }

    #[test]
    fn classify_out_of_range_is_unknown() {
        assert_eq!(classify(-1), Color::Unknown);
        assert_eq!(classify(15), Color::Unknown);
        assert_eq!(classify(i32::MAX), Color::Unknown);
        assert_eq!(classify(i32::MIN), Color::Unknown);
    }

    #[test]
    fn name_round_trip() {
        for color in [Color::Red, Color::Black, Color::White, Color::Unknown] {
            assert_eq!(Color::from_name(color.as_str()), color);
        }
    }

    #[test]
    fn from_name_falls_back_to_unknown() {
        assert_eq!(Color::from_name("green"), Color::Unknown);
        assert_eq!(Color::from_name(""), Color::Unknown);
    }

    #[test]
    fn serde_uses_lowercase_names() {
        let json = serde_json::to_string(&Color::Red).unwrap_or_default();
        assert_eq!(json, "\"red\"");
    }
}
