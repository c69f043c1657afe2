//! Free-text duration parsing.
//!
//! Slicers write print time estimates as loose text such as `1d 2h 3m 4s`
//! or `5 minutes, 4 seconds`. [`parse_duration`] sums every
//! `<number><unit>` pair it finds and ignores everything else.

use lazy_regex::{lazy_regex, Lazy, Regex};
use tracing::trace;

static RE_QUANTITY_UNIT: Lazy<Regex> = lazy_regex!(r"([0-9.]+)\s*([a-zA-Z]+)");

/// Time unit recognized in a duration expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    /// `s`, `second`, `seconds`.
    Second,
    /// `m`, `min`, `minute`, `minutes`.
    Minute,
    /// `h`, `hour`, `hours`.
    Hour,
    /// `d`, `day`, `days`.
    Day,
}

impl TimeUnit {
    /// Look up a unit token. Matching is exact and case-sensitive.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "s" | "second" | "seconds" => Some(Self::Second),
            "m" | "min" | "minute" | "minutes" => Some(Self::Minute),
            "h" | "hour" | "hours" => Some(Self::Hour),
            "d" | "day" | "days" => Some(Self::Day),
            _ => None,
        }
    }

    /// Number of seconds in one unit.
    pub fn seconds(self) -> f64 {
        match self {
            Self::Second => 1.0,
            Self::Minute => 60.0,
            Self::Hour => 3600.0,
            Self::Day => 86400.0,
        }
    }

    /// Seconds per unit for `token`, or 0 when the token is not a known unit.
    pub fn seconds_or_zero(token: &str) -> f64 {
        match Self::from_token(token) {
            Some(unit) => unit.seconds(),
            None => 0.0,
        }
    }
}

/// Convert a duration expression to total seconds.
///
/// Never fails. Tokens with an unknown unit, or a quantity that is not a
/// valid number (`"."`, `"1.2.3"`), contribute nothing.
///
/// ```
/// use gcode_analysis::parse_duration;
///
/// assert_eq!(parse_duration("5 minutes, 4 seconds + 82 hours"), 295_504.0);
/// ```
pub fn parse_duration(text: &str) -> f64 {
    let mut total = 0.0;
    for caps in RE_QUANTITY_UNIT.captures_iter(text) {
        let quantity = &caps[1];
        let unit = &caps[2];

        let Ok(quantity) = quantity.parse::<f64>() else {
            trace!(quantity, unit, "ignoring malformed duration quantity");
            continue;
        };
        if TimeUnit::from_token(unit).is_none() {
            trace!(quantity, unit, "ignoring unknown duration unit");
        }
        total += quantity * TimeUnit::seconds_or_zero(unit);
    }
    total
}
