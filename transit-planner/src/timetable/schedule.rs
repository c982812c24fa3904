//! Per-edge departure schedules.
//!
//! Each directed stop pair owns a sequence of scheduled departures sorted
//! ascending by departure time. Lookups binary-search for the earliest
//! departure at or after a query time; sortedness is a precondition the
//! constructor asserts, not a service it provides.

use crate::domain::{ClockTime, LineId};

/// Error returned when a schedule violates the sorted-departures precondition.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("departures are not sorted ascending by departure time (entry {index})")]
pub struct UnsortedSchedule {
    /// Index of the first entry that departs before its predecessor.
    pub index: usize,
}

/// One timetable entry: a scheduled vehicle departure on a directed edge.
///
/// `travel_minutes` is the quoted riding time and is authoritative for
/// costing; `arrival` is authoritative for chaining further lookups. Both
/// come from the upstream timetable and are not cross-checked here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Departure {
    /// Scheduled departure time at the origin stop.
    pub departure: ClockTime,
    /// Quoted riding time in whole minutes.
    pub travel_minutes: i64,
    /// Line operating this departure.
    pub line: LineId,
    /// Scheduled arrival time at the destination stop.
    pub arrival: ClockTime,
}

impl Departure {
    /// Creates a timetable entry.
    pub fn new(
        departure: ClockTime,
        travel_minutes: i64,
        line: LineId,
        arrival: ClockTime,
    ) -> Self {
        Self {
            departure,
            travel_minutes,
            line,
            arrival,
        }
    }
}

/// The sorted departure sequence of one directed stop pair.
///
/// Entries are ascending by departure time. Several entries may share a
/// departure time (different lines); their relative order is whatever the
/// caller supplied.
#[derive(Debug, Clone, Default)]
pub struct EdgeSchedule {
    entries: Vec<Departure>,
}

impl EdgeSchedule {
    /// Wraps a pre-sorted departure sequence, asserting the sort order.
    ///
    /// # Errors
    ///
    /// Returns [`UnsortedSchedule`] naming the first out-of-order entry.
    pub fn new(entries: Vec<Departure>) -> Result<Self, UnsortedSchedule> {
        for (index, pair) in entries.windows(2).enumerate() {
            if pair[1].departure < pair[0].departure {
                return Err(UnsortedSchedule { index: index + 1 });
            }
        }
        Ok(Self { entries })
    }

    /// All entries in departure order.
    pub fn entries(&self) -> &[Departure] {
        &self.entries
    }

    /// Number of scheduled departures.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the edge has no scheduled departures.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Index of the earliest entry departing at or after `at`.
    ///
    /// Binary search over the sorted departures. Returns `None` when every
    /// departure is strictly earlier than `at` (the edge is exhausted for
    /// this query time).
    pub fn lower_bound(&self, at: ClockTime) -> Option<usize> {
        let index = self.entries.partition_point(|entry| entry.departure < at);
        (index < self.entries.len()).then_some(index)
    }

    /// The earliest entry departing at or after `at`, if any.
    pub fn earliest_at(&self, at: ClockTime) -> Option<&Departure> {
        self.lower_bound(at).map(|index| &self.entries[index])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time(s: &str) -> ClockTime {
        ClockTime::parse(s).unwrap()
    }

    fn entry(dep: &str, minutes: i64, line: &str, arr: &str) -> Departure {
        Departure::new(
            time(dep),
            minutes,
            LineId::new(line).unwrap(),
            time(arr),
        )
    }

    fn schedule() -> EdgeSchedule {
        EdgeSchedule::new(vec![
            entry("08:00", 4, "A", "08:04"),
            entry("08:15", 4, "A", "08:19"),
            entry("08:15", 6, "D", "08:21"),
            entry("09:00", 4, "A", "09:04"),
        ])
        .unwrap()
    }

    #[test]
    fn rejects_unsorted() {
        let result = EdgeSchedule::new(vec![
            entry("08:15", 4, "A", "08:19"),
            entry("08:00", 4, "A", "08:04"),
        ]);
        assert_eq!(result.unwrap_err(), UnsortedSchedule { index: 1 });
    }

    #[test]
    fn equal_departures_keep_insertion_order() {
        let schedule = schedule();
        assert_eq!(schedule.entries()[1].line.as_str(), "A");
        assert_eq!(schedule.entries()[2].line.as_str(), "D");
    }

    #[test]
    fn lower_bound_finds_exact_match() {
        let schedule = schedule();
        assert_eq!(schedule.lower_bound(time("08:15")), Some(1));
    }

    #[test]
    fn lower_bound_finds_next_departure() {
        let schedule = schedule();
        assert_eq!(schedule.lower_bound(time("08:01")), Some(1));
        assert_eq!(schedule.lower_bound(time("07:00")), Some(0));
    }

    #[test]
    fn lower_bound_exhausted() {
        let schedule = schedule();
        assert_eq!(schedule.lower_bound(time("09:01")), None);
        assert_eq!(schedule.earliest_at(time("23:59")), None);
    }

    #[test]
    fn lower_bound_on_empty() {
        let schedule = EdgeSchedule::new(vec![]).unwrap();
        assert_eq!(schedule.lower_bound(time("08:00")), None);
    }

    #[test]
    fn earliest_at_boundary() {
        let schedule = schedule();
        let found = schedule.earliest_at(time("09:00")).unwrap();
        assert_eq!(found.departure, time("09:00"));
    }
}
