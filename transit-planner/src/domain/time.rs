//! Clock time handling for timetables.
//!
//! Timetable rows carry times as "HH:MM:SS" strings with no date attached.
//! This module provides a time-of-day type whose *ordering* is exact (so
//! sorted schedules and binary search see the full time) but whose *minute
//! arithmetic* ignores seconds, matching how travel durations are quoted.

use std::cmp::Ordering;
use std::fmt;

use chrono::{NaiveTime, Timelike};
use serde::{Serialize, Serializer};

/// Error returned when parsing an invalid time string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// A time of day on the scheduling clock.
///
/// Wraps a [`NaiveTime`]. Comparison uses the full time including seconds;
/// minute arithmetic ([`minute_of_day`](Self::minute_of_day),
/// [`minutes_since`](Self::minutes_since)) truncates seconds.
///
/// # Examples
///
/// ```
/// use transit_planner::domain::ClockTime;
///
/// let dep = ClockTime::parse("08:00").unwrap();
/// let arr = ClockTime::parse("08:35:30").unwrap();
/// assert!(arr > dep);
/// assert_eq!(arr.minutes_since(dep), 35);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClockTime(NaiveTime);

impl ClockTime {
    /// Create a clock time from hour/minute components (seconds zero).
    pub fn hm(hour: u32, minute: u32) -> Result<Self, TimeError> {
        NaiveTime::from_hms_opt(hour, minute, 0)
            .map(Self)
            .ok_or_else(|| TimeError::new("hour must be 0-23 and minute 0-59"))
    }

    /// Parse a time from `"HH:MM"` or `"HH:MM:SS"` format.
    ///
    /// # Examples
    ///
    /// ```
    /// use transit_planner::domain::ClockTime;
    ///
    /// assert!(ClockTime::parse("00:00").is_ok());
    /// assert!(ClockTime::parse("23:59:59").is_ok());
    ///
    /// assert!(ClockTime::parse("815").is_err());
    /// assert!(ClockTime::parse("8:15").is_err());
    /// assert!(ClockTime::parse("24:00").is_err());
    /// assert!(ClockTime::parse("12:60").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, TimeError> {
        let bytes = s.as_bytes();

        let second = match bytes.len() {
            5 => 0,
            8 => {
                if bytes[5] != b':' {
                    return Err(TimeError::new("expected colon at position 5"));
                }
                let second = parse_two_digits(&bytes[6..8])
                    .ok_or_else(|| TimeError::new("invalid second digits"))?;
                if second > 59 {
                    return Err(TimeError::new("second must be 0-59"));
                }
                second
            }
            _ => return Err(TimeError::new("expected HH:MM or HH:MM:SS format")),
        };

        if bytes[2] != b':' {
            return Err(TimeError::new("expected colon at position 2"));
        }

        let hour =
            parse_two_digits(&bytes[0..2]).ok_or_else(|| TimeError::new("invalid hour digits"))?;
        if hour > 23 {
            return Err(TimeError::new("hour must be 0-23"));
        }

        let minute = parse_two_digits(&bytes[3..5])
            .ok_or_else(|| TimeError::new("invalid minute digits"))?;
        if minute > 59 {
            return Err(TimeError::new("minute must be 0-59"));
        }

        let time = NaiveTime::from_hms_opt(hour, minute, second)
            .ok_or_else(|| TimeError::new("invalid time"))?;

        Ok(Self(time))
    }

    /// Returns the hour (0-23).
    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    /// Returns the minute (0-59).
    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    /// Returns the second (0-59).
    pub fn second(&self) -> u32 {
        self.0.second()
    }

    /// Minutes elapsed since midnight, seconds truncated.
    pub fn minute_of_day(&self) -> i64 {
        i64::from(self.hour()) * 60 + i64::from(self.minute())
    }

    /// Signed whole minutes from `earlier` to `self`, seconds truncated.
    ///
    /// Negative when `earlier` is actually the later time; the scheduling
    /// clock has no date, so callers own any cross-midnight interpretation.
    ///
    /// # Examples
    ///
    /// ```
    /// use transit_planner::domain::ClockTime;
    ///
    /// let a = ClockTime::parse("08:10").unwrap();
    /// let b = ClockTime::parse("08:35").unwrap();
    /// assert_eq!(b.minutes_since(a), 25);
    /// assert_eq!(a.minutes_since(b), -25);
    /// ```
    pub fn minutes_since(&self, earlier: Self) -> i64 {
        self.minute_of_day() - earlier.minute_of_day()
    }
}

impl Ord for ClockTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl PartialOrd for ClockTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Debug for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ClockTime({:02}:{:02}:{:02})",
            self.hour(),
            self.minute(),
            self.second()
        )
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}",
            self.hour(),
            self.minute(),
            self.second()
        )
    }
}

impl Serialize for ClockTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Parse two ASCII digit bytes into a u32.
fn parse_two_digits(bytes: &[u8]) -> Option<u32> {
    if bytes.len() != 2 {
        return None;
    }
    let d1 = (bytes[0] as char).to_digit(10)?;
    let d2 = (bytes[1] as char).to_digit(10)?;
    Some(d1 * 10 + d2)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Any in-range (h, m, s) triple formats and reparses to itself.
        #[test]
        fn roundtrip(h in 0u32..24, m in 0u32..60, s in 0u32..60) {
            let formatted = format!("{h:02}:{m:02}:{s:02}");
            let t = ClockTime::parse(&formatted).unwrap();
            prop_assert_eq!(t.to_string(), formatted);
        }

        /// Ordering agrees with second-of-day ordering.
        #[test]
        fn order_matches_seconds_of_day(
            h1 in 0u32..24, m1 in 0u32..60, s1 in 0u32..60,
            h2 in 0u32..24, m2 in 0u32..60, s2 in 0u32..60,
        ) {
            let a = ClockTime::parse(&format!("{h1:02}:{m1:02}:{s1:02}")).unwrap();
            let b = ClockTime::parse(&format!("{h2:02}:{m2:02}:{s2:02}")).unwrap();
            let a_secs = (h1 * 60 + m1) * 60 + s1;
            let b_secs = (h2 * 60 + m2) * 60 + s2;
            prop_assert_eq!(a.cmp(&b), a_secs.cmp(&b_secs));
        }

        /// minutes_since is antisymmetric and second-blind.
        #[test]
        fn minutes_since_antisymmetric(
            h1 in 0u32..24, m1 in 0u32..60, s1 in 0u32..60,
            h2 in 0u32..24, m2 in 0u32..60, s2 in 0u32..60,
        ) {
            let a = ClockTime::parse(&format!("{h1:02}:{m1:02}:{s1:02}")).unwrap();
            let b = ClockTime::parse(&format!("{h2:02}:{m2:02}:{s2:02}")).unwrap();
            prop_assert_eq!(a.minutes_since(b), -b.minutes_since(a));
            let expected = i64::from(h1 * 60 + m1) - i64::from(h2 * 60 + m2);
            prop_assert_eq!(a.minutes_since(b), expected);
        }
    }
}
