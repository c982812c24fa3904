//! Stop identity and location types.

use std::fmt;

use serde::Serialize;

/// Error returned when constructing an invalid stop name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid stop name: {reason}")]
pub struct InvalidStopName {
    reason: &'static str,
}

/// A normalized stop name.
///
/// Stop names arrive from timetable data with inconsistent casing and
/// padding; this type folds them to a single canonical form (trimmed,
/// lowercase) so that lookups, equality, and hashing all agree. Any
/// `StopName` value is canonical by construction.
///
/// # Examples
///
/// ```
/// use transit_planner::domain::StopName;
///
/// let a = StopName::new("Pl. Grunwaldzki").unwrap();
/// let b = StopName::new("  pl. grunwaldzki ").unwrap();
/// assert_eq!(a, b);
/// assert_eq!(a.as_str(), "pl. grunwaldzki");
///
/// // Blank names are rejected
/// assert!(StopName::new("   ").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct StopName(String);

impl StopName {
    /// Normalize a raw name into a canonical stop name.
    ///
    /// Trims surrounding whitespace and case-folds to lowercase. The result
    /// must be non-empty.
    pub fn new(raw: &str) -> Result<Self, InvalidStopName> {
        let normalized = raw.trim().to_lowercase();
        if normalized.is_empty() {
            return Err(InvalidStopName {
                reason: "must contain at least one non-whitespace character",
            });
        }
        Ok(Self(normalized))
    }

    /// Returns the canonical name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for StopName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StopName({})", self.0)
    }
}

impl fmt::Display for StopName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A 2-D stop coordinate.
///
/// Used only to feed heuristics; the axes are whatever the data source
/// provides and are deliberately not validated or projected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coord {
    pub x: f64,
    pub y: f64,
}

impl Coord {
    /// Creates a coordinate from raw axis values.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Manhattan distance to another coordinate, in coordinate units.
    pub fn manhattan_distance(&self, other: &Self) -> f64 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Normalization is idempotent: re-normalizing a canonical name is a no-op.
        #[test]
        fn normalization_idempotent(raw in "\\PC{1,30}") {
            if let Ok(name) = StopName::new(&raw) {
                let again = StopName::new(name.as_str()).unwrap();
                prop_assert_eq!(name, again);
            }
        }

        /// Case variants of the same name always compare equal.
        #[test]
        fn case_insensitive(raw in "[a-zA-Z]{1,20}") {
            let lower = StopName::new(&raw.to_lowercase()).unwrap();
            let upper = StopName::new(&raw.to_uppercase()).unwrap();
            prop_assert_eq!(lower, upper);
        }

        /// Manhattan distance is symmetric and non-negative.
        #[test]
        fn manhattan_symmetric(x1 in -100.0..100.0f64, y1 in -100.0..100.0f64,
                               x2 in -100.0..100.0f64, y2 in -100.0..100.0f64) {
            let a = Coord::new(x1, y1);
            let b = Coord::new(x2, y2);
            prop_assert_eq!(a.manhattan_distance(&b), b.manhattan_distance(&a));
            prop_assert!(a.manhattan_distance(&b) >= 0.0);
        }
    }
}
