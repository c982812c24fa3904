//! Transit line identifier.

use std::fmt;

use serde::Serialize;

/// Error returned when constructing an invalid line identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid line id: must be non-empty")]
pub struct InvalidLineId;

/// A transit line identifier (e.g. `"A"`, `"145"`, `"N7"`).
///
/// Line identifiers are compared exactly as the timetable spells them;
/// two vehicles are "the same line" only on an exact match.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct LineId(String);

impl LineId {
    /// Creates a line identifier from a raw string.
    pub fn new(raw: &str) -> Result<Self, InvalidLineId> {
        if raw.is_empty() {
            return Err(InvalidLineId);
        }
        Ok(Self(raw.to_string()))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LineId({})", self.0)
    }
}

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_typical_ids() {
        assert!(LineId::new("A").is_ok());
        assert!(LineId::new("145").is_ok());
        assert!(LineId::new("N7").is_ok());
    }

    #[test]
    fn rejects_empty() {
        assert!(LineId::new("").is_err());
    }

    #[test]
    fn comparison_is_exact() {
        let a = LineId::new("a").unwrap();
        let upper = LineId::new("A").unwrap();
        assert_ne!(a, upper);
    }
}
