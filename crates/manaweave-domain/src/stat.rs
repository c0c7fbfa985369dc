//! Power, toughness and loyalty values

use serde::{Deserialize, Serialize};
use std::fmt;

/// Numeric stand-in for a `*` stat
pub const STAR_SENTINEL: i32 = i32::MIN;

/// Numeric stand-in for an `X` stat
pub const VARIABLE_SENTINEL: i32 = i32::MIN + 1;

/// Smallest printed value kept apart from both sentinels
const MIN_FIXED: i32 = VARIABLE_SENTINEL + 1;

/// A printed power, toughness or loyalty value
///
/// `*` and `X` are kept apart from real numbers so that a `*/*` creature
/// never compares equal to a `0/0` one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatValue {
    /// A printed integer (may be negative)
    Fixed(i32),
    /// Characteristic-defining `*`, including forms like `1+*`
    Star,
    /// `X`
    Variable,
}

impl StatValue {
    /// Parse a printed stat
    ///
    /// Unparseable text converts to `Fixed(0)`. Values that would collide
    /// with a sentinel are clamped just above them.
    ///
    /// # Examples
    ///
    /// ```
    /// use manaweave_domain::StatValue;
    ///
    /// assert_eq!(StatValue::parse("3"), StatValue::Fixed(3));
    /// assert_eq!(StatValue::parse("-1"), StatValue::Fixed(-1));
    /// assert_eq!(StatValue::parse("*"), StatValue::Star);
    /// assert_eq!(StatValue::parse("x"), StatValue::Variable);
    /// assert_eq!(StatValue::parse("?"), StatValue::Fixed(0));
    /// ```
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.eq_ignore_ascii_case("x") {
            return StatValue::Variable;
        }
        if raw.contains('*') {
            return StatValue::Star;
        }
        raw.parse::<i32>()
            .map(|n| StatValue::Fixed(n.max(MIN_FIXED)))
            .unwrap_or(StatValue::Fixed(0))
    }

    /// Numeric form used for storage and comparison
    pub fn to_numeric(&self) -> i32 {
        match self {
            StatValue::Fixed(n) => *n,
            StatValue::Star => STAR_SENTINEL,
            StatValue::Variable => VARIABLE_SENTINEL,
        }
    }

    /// Inverse of [`StatValue::to_numeric`]
    pub fn from_numeric(value: i32) -> Self {
        match value {
            STAR_SENTINEL => StatValue::Star,
            VARIABLE_SENTINEL => StatValue::Variable,
            n => StatValue::Fixed(n),
        }
    }
}

impl fmt::Display for StatValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatValue::Fixed(n) => write!(f, "{}", n),
            StatValue::Star => write!(f, "*"),
            StatValue::Variable => write!(f, "X"),
        }
    }
}
