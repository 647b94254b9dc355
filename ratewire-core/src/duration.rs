//! Compact duration parsing.
//!
//! Rate-limit reset headers encode the time until the quota refills as a run
//! of unit-suffixed integers, e.g. `6m45s99ms` or `1h30m15s1ms`:
//!
//! ```text
//! timestamp := hourSeg? minSeg? secSeg? msSeg?
//! hourSeg   := digits "h"
//! minSeg    := digits "m"      (not immediately followed by "s")
//! secSeg    := digits "s"
//! msSeg     := digits "ms"
//! ```
//!
//! Every segment is optional, so the empty string is a valid zero duration.
//! Matching is anchored at the start of the input. In [`ParseMode::Lenient`]
//! anything after the last recognized segment is ignored; in
//! [`ParseMode::Strict`] it is an error.

use std::str::FromStr;
use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::FormatError;

// ============================================================================
// Segment Pattern
// ============================================================================

/// One anchored segment. `ms` comes before `m` so a millisecond suffix is
/// never read as minutes followed by a stray `s`.
static SEGMENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]+)(ms|h|m|s)").expect("Invalid segment regex")
});

const SECS_PER_HOUR: u64 = 3600;
const SECS_PER_MINUTE: u64 = 60;

/// Segment units in the order they must appear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Unit {
    Hours,
    Minutes,
    Seconds,
    Millis,
}

impl Unit {
    fn from_suffix(suffix: &str) -> Option<Self> {
        match suffix {
            "h" => Some(Self::Hours),
            "m" => Some(Self::Minutes),
            "s" => Some(Self::Seconds),
            "ms" => Some(Self::Millis),
            _ => None,
        }
    }
}

// ============================================================================
// Parse Mode
// ============================================================================

/// How to treat input left over after the last recognized segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParseMode {
    /// Ignore trailing content (`"5s junk"` parses as five seconds).
    #[default]
    Lenient,
    /// Reject trailing content with [`FormatError::TrailingInput`].
    Strict,
}

// ============================================================================
// Compact Duration
// ============================================================================

/// The segment breakdown of a compact duration string.
///
/// Absent segments are zero. Fields are kept exactly as written: `1500ms`
/// stays `millis = 1500` and is only folded into seconds by
/// [`CompactDuration::try_to_duration`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompactDuration {
    /// Hour segment magnitude.
    pub hours: u64,
    /// Minute segment magnitude.
    pub minutes: u64,
    /// Second segment magnitude.
    pub seconds: u64,
    /// Millisecond segment magnitude.
    pub millis: u64,
}

impl CompactDuration {
    /// Parses `input` in [`ParseMode::Lenient`].
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::OutOfRange`] if a segment does not fit in a `u64`.
    pub fn parse(input: &str) -> Result<Self, FormatError> {
        Self::parse_with(input, ParseMode::Lenient)
    }

    /// Parses `input` with the given mode.
    ///
    /// Segments are consumed left to right while their units keep strictly
    /// increasing (h, m, s, ms). The first token that is not a segment, or
    /// whose unit is out of order, ends the match.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::OutOfRange`] if a segment does not fit in a
    /// `u64`, and [`FormatError::TrailingInput`] in strict mode when the match
    /// does not consume the whole input.
    pub fn parse_with(input: &str, mode: ParseMode) -> Result<Self, FormatError> {
        let mut parsed = Self::default();
        let mut rest = input;
        let mut last: Option<Unit> = None;

        while let Some(caps) = SEGMENT_RE.captures(rest) {
            let Some(unit) = Unit::from_suffix(&caps[2]) else {
                break;
            };
            if last.is_some_and(|prev| unit <= prev) {
                break;
            }

            let magnitude: u64 = caps[1].parse().map_err(|source| FormatError::OutOfRange {
                input: input.to_string(),
                source,
            })?;
            parsed.set(unit, magnitude);

            last = Some(unit);
            rest = &rest[caps[0].len()..];
        }

        if !rest.is_empty() {
            match mode {
                ParseMode::Lenient => {
                    trace!(input, remainder = rest, "Ignoring trailing timestamp content");
                }
                ParseMode::Strict => {
                    return Err(FormatError::TrailingInput {
                        input: input.to_string(),
                        remainder: rest.to_string(),
                    });
                }
            }
        }

        Ok(parsed)
    }

    fn set(&mut self, unit: Unit, magnitude: u64) {
        match unit {
            Unit::Hours => self.hours = magnitude,
            Unit::Minutes => self.minutes = magnitude,
            Unit::Seconds => self.seconds = magnitude,
            Unit::Millis => self.millis = magnitude,
        }
    }

    /// Returns true if every segment is zero.
    pub fn is_zero(&self) -> bool {
        self.hours == 0 && self.minutes == 0 && self.seconds == 0 && self.millis == 0
    }

    /// Combines the segments into one interval.
    ///
    /// Hours, minutes and seconds form the whole-second base; milliseconds
    /// are added on top. Returns `None` if the total overflows.
    pub fn try_to_duration(&self) -> Option<Duration> {
        let secs = self
            .hours
            .checked_mul(SECS_PER_HOUR)?
            .checked_add(self.minutes.checked_mul(SECS_PER_MINUTE)?)?
            .checked_add(self.seconds)?;
        Duration::from_secs(secs).checked_add(Duration::from_millis(self.millis))
    }

    /// Returns the interval as a chrono duration, if it fits.
    pub fn to_time_delta(&self) -> Option<chrono::Duration> {
        self.try_to_duration()
            .and_then(|d| chrono::Duration::from_std(d).ok())
    }
}

impl FromStr for CompactDuration {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// ============================================================================
// Entry Points
// ============================================================================

/// Parses a compact duration string such as `6m45s99ms` into a [`Duration`].
///
/// Trailing content after the last segment is ignored; use
/// [`parse_compact_duration_with`] with [`ParseMode::Strict`] to reject it.
///
/// # Errors
///
/// Returns [`FormatError`] if a segment or the combined total is out of range.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use ratewire_core::parse_compact_duration;
///
/// let d = parse_compact_duration("6m45s99ms").unwrap();
/// assert_eq!(d, Duration::from_millis(6 * 60_000 + 45_000 + 99));
/// assert_eq!(parse_compact_duration("").unwrap(), Duration::ZERO);
/// ```
pub fn parse_compact_duration(input: &str) -> Result<Duration, FormatError> {
    parse_compact_duration_with(input, ParseMode::Lenient)
}

/// Parses a compact duration string with an explicit [`ParseMode`].
///
/// # Errors
///
/// Returns [`FormatError`] if parsing fails in the given mode or the total
/// does not fit in a [`Duration`].
pub fn parse_compact_duration_with(input: &str, mode: ParseMode) -> Result<Duration, FormatError> {
    CompactDuration::parse_with(input, mode)?
        .try_to_duration()
        .ok_or_else(|| FormatError::Overflow {
            input: input.to_string(),
        })
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn hms_ms(h: u64, m: u64, s: u64, ms: u64) -> Duration {
        Duration::from_secs(h * 3600 + m * 60 + s) + Duration::from_millis(ms)
    }

    #[test]
    fn test_empty_is_zero() {
        assert_eq!(parse_compact_duration("").unwrap(), Duration::ZERO);
        assert!(CompactDuration::parse("").unwrap().is_zero());
    }

    #[test]
    fn test_minutes_seconds_millis() {
        assert_eq!(parse_compact_duration("6m45s99ms").unwrap(), hms_ms(0, 6, 45, 99));
    }

    #[test]
    fn test_all_segments() {
        let parsed = CompactDuration::parse("1h30m15s1ms").unwrap();
        assert_eq!(
            parsed,
            CompactDuration {
                hours: 1,
                minutes: 30,
                seconds: 15,
                millis: 1,
            }
        );
        assert_eq!(parsed.try_to_duration(), Some(hms_ms(1, 30, 15, 1)));
    }

    #[test]
    fn test_single_segments() {
        let test_cases = vec![
            ("1h", hms_ms(1, 0, 0, 0)),
            ("10m", hms_ms(0, 10, 0, 0)),
            ("45s", hms_ms(0, 0, 45, 0)),
            ("500ms", hms_ms(0, 0, 0, 500)),
            ("0s", Duration::ZERO),
        ];

        for (input, expected) in test_cases {
            assert_eq!(parse_compact_duration(input).unwrap(), expected, "Failed for {input}");
        }
    }

    #[test]
    fn test_minute_not_confused_with_millis() {
        let minutes = CompactDuration::parse("10m").unwrap();
        assert_eq!(minutes.minutes, 10);
        assert_eq!(minutes.millis, 0);

        let millis = CompactDuration::parse("10ms").unwrap();
        assert_eq!(millis.minutes, 0);
        assert_eq!(millis.millis, 10);

        let both = CompactDuration::parse("2m10ms").unwrap();
        assert_eq!((both.minutes, both.seconds, both.millis), (2, 0, 10));
    }

    #[test]
    fn test_millis_not_renormalized() {
        let parsed = CompactDuration::parse("1s1500ms").unwrap();
        assert_eq!(parsed.seconds, 1);
        assert_eq!(parsed.millis, 1500);
        assert_eq!(parsed.try_to_duration(), Some(Duration::from_millis(2500)));
    }

    #[test]
    fn test_leading_zeros() {
        assert_eq!(parse_compact_duration("01m007s").unwrap(), hms_ms(0, 1, 7, 0));
    }

    #[test]
    fn test_deterministic() {
        let first = CompactDuration::parse("3h2m1s0ms").unwrap();
        let second = CompactDuration::parse("3h2m1s0ms").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_lenient_ignores_trailing_content() {
        assert_eq!(parse_compact_duration("5s garbage").unwrap(), hms_ms(0, 0, 5, 0));
        assert_eq!(parse_compact_duration("20m5").unwrap(), hms_ms(0, 20, 0, 0));
        assert_eq!(parse_compact_duration("abc").unwrap(), Duration::ZERO);
        assert_eq!(parse_compact_duration(" 5s").unwrap(), Duration::ZERO);
    }

    #[test]
    fn test_out_of_order_stops_match() {
        // The second hour segment and the late minute segment are not part of the match.
        assert_eq!(parse_compact_duration("1h2h").unwrap(), hms_ms(1, 0, 0, 0));
        assert_eq!(parse_compact_duration("45s6m").unwrap(), hms_ms(0, 0, 45, 0));
        assert_eq!(parse_compact_duration("5ms3s").unwrap(), hms_ms(0, 0, 0, 5));
    }

    #[test]
    fn test_strict_rejects_trailing_content() {
        let err = parse_compact_duration_with("45s6m", ParseMode::Strict).unwrap_err();
        assert_eq!(
            err,
            FormatError::TrailingInput {
                input: "45s6m".to_string(),
                remainder: "6m".to_string(),
            }
        );

        let err = CompactDuration::parse_with("1x", ParseMode::Strict).unwrap_err();
        assert_eq!(err.input(), "1x");
    }

    #[test]
    fn test_strict_accepts_full_match() {
        assert_eq!(
            parse_compact_duration_with("1h30m15s1ms", ParseMode::Strict).unwrap(),
            hms_ms(1, 30, 15, 1)
        );
        assert_eq!(parse_compact_duration_with("", ParseMode::Strict).unwrap(), Duration::ZERO);
    }

    #[test]
    fn test_segment_out_of_range() {
        let input = "99999999999999999999h";
        let err = parse_compact_duration(input).unwrap_err();
        assert!(matches!(err, FormatError::OutOfRange { .. }));
        assert_eq!(err.input(), input);
    }

    #[test]
    fn test_out_of_order_overflow_is_not_parsed() {
        // Digits past the end of the match are never converted.
        assert_eq!(
            parse_compact_duration("5s99999999999999999999h").unwrap(),
            hms_ms(0, 0, 5, 0)
        );
    }

    #[test]
    fn test_total_overflow() {
        let input = format!("{}h", u64::MAX / 2);
        let err = parse_compact_duration(&input).unwrap_err();
        assert_eq!(err, FormatError::Overflow { input: input.clone() });
        assert_eq!(err.input(), input);
    }

    #[test]
    fn test_non_ascii_digits_are_not_segments() {
        assert_eq!(parse_compact_duration("٣s").unwrap(), Duration::ZERO);
        assert!(parse_compact_duration_with("٣s", ParseMode::Strict).is_err());
    }

    #[test]
    fn test_from_str() {
        let parsed: CompactDuration = "6m45s99ms".parse().unwrap();
        assert_eq!((parsed.minutes, parsed.seconds, parsed.millis), (6, 45, 99));
    }

    #[test]
    fn test_to_time_delta() {
        let parsed = CompactDuration::parse("1m500ms").unwrap();
        assert_eq!(parsed.to_time_delta(), Some(chrono::Duration::milliseconds(60_500)));
    }
}
