//! Ride leg type.
//!
//! A `Leg` is one scheduled vehicle ride chosen during a search: the line
//! taken and the departure/arrival times of the concrete timetable entry.

use serde::Serialize;

use super::{ClockTime, LineId};

/// One scheduled ride between two adjacent stops.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Leg {
    /// Line the ride is on.
    pub line: LineId,
    /// Scheduled departure at the origin stop.
    pub departure: ClockTime,
    /// Scheduled arrival at the destination stop.
    pub arrival: ClockTime,
}

impl Leg {
    /// Creates a leg from its line and times.
    pub fn new(line: LineId, departure: ClockTime, arrival: ClockTime) -> Self {
        Self {
            line,
            departure,
            arrival,
        }
    }

    /// Whole minutes spent riding, from departure to arrival.
    pub fn ride_minutes(&self) -> i64 {
        self.arrival.minutes_since(self.departure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time(s: &str) -> ClockTime {
        ClockTime::parse(s).unwrap()
    }

    #[test]
    fn ride_minutes() {
        let leg = Leg::new(LineId::new("A").unwrap(), time("08:00"), time("08:35"));
        assert_eq!(leg.ride_minutes(), 35);
    }
}
