//! Transit graph: adjacency, schedules, and stop coordinates.
//!
//! Built once from upstream timetable rows and immutable afterwards, so a
//! single graph can back any number of concurrent searches.

use std::collections::HashMap;

use crate::domain::{Coord, StopName};

use super::schedule::{Departure, EdgeSchedule, UnsortedSchedule};

/// Error raised while assembling a transit graph.
#[derive(Debug, Clone, thiserror::Error)]
pub enum GraphError {
    /// An edge's departure sequence violates the sorted precondition
    #[error("schedule for {from} -> {to} is not sorted: {source}")]
    UnsortedSchedule {
        from: StopName,
        to: StopName,
        source: UnsortedSchedule,
    },
}

/// Error raised when schedule data is missing for an edge the adjacency
/// claims to exist. This indicates malformed graph construction, not an
/// exhausted timetable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("no timetable entries for edge {from} -> {to}")]
pub struct ScheduleError {
    pub from: StopName,
    pub to: StopName,
}

/// The transit network: who is reachable from where, on what schedule.
///
/// Three read-only views over the same timetable data:
///
/// - adjacency: origin stop to the distinct stops reachable in one ride,
///   in first-seen order (multi-edges collapse to a single entry);
/// - schedules: directed stop pair to its sorted [`EdgeSchedule`];
/// - coordinates: optional per-stop location, consumed only by heuristics.
#[derive(Debug, Clone, Default)]
pub struct TransitGraph {
    adjacency: HashMap<StopName, Vec<StopName>>,
    schedules: HashMap<(StopName, StopName), EdgeSchedule>,
    coordinates: HashMap<StopName, Coord>,
}

impl TransitGraph {
    /// Starts an empty builder.
    pub fn builder() -> TransitGraphBuilder {
        TransitGraphBuilder::default()
    }

    /// Assembles a graph directly from its parts.
    ///
    /// Each edge's departure vector must already be sorted ascending by
    /// departure time; that precondition is asserted here. Agreement
    /// between `adjacency` and `schedules` is the caller's responsibility;
    /// an adjacency entry without schedule data surfaces later as a
    /// [`ScheduleError`] from the search that touches it.
    pub fn from_parts(
        adjacency: HashMap<StopName, Vec<StopName>>,
        schedules: HashMap<(StopName, StopName), Vec<Departure>>,
        coordinates: HashMap<StopName, Coord>,
    ) -> Result<Self, GraphError> {
        let mut checked = HashMap::with_capacity(schedules.len());
        for ((from, to), entries) in schedules {
            let schedule =
                EdgeSchedule::new(entries).map_err(|source| GraphError::UnsortedSchedule {
                    from: from.clone(),
                    to: to.clone(),
                    source,
                })?;
            checked.insert((from, to), schedule);
        }
        Ok(Self {
            adjacency,
            schedules: checked,
            coordinates,
        })
    }

    /// Stops reachable from `stop` in one ride.
    ///
    /// `None` for a stop with no outgoing edges: a dead end, not an error.
    pub fn neighbors(&self, stop: &StopName) -> Option<&[StopName]> {
        self.adjacency.get(stop).map(Vec::as_slice)
    }

    /// The departure schedule of a directed edge.
    ///
    /// # Errors
    ///
    /// [`ScheduleError`] when the pair has no timetable entries at all:
    /// adjacency and schedule data disagree, which is fatal to the search
    /// that encounters it.
    pub fn timetable(&self, from: &StopName, to: &StopName) -> Result<&EdgeSchedule, ScheduleError> {
        self.schedules
            .get(&(from.clone(), to.clone()))
            .ok_or_else(|| ScheduleError {
                from: from.clone(),
                to: to.clone(),
            })
    }

    /// A stop's coordinate, if the timetable supplied one.
    pub fn coordinate(&self, stop: &StopName) -> Option<Coord> {
        self.coordinates.get(stop).copied()
    }

    /// Number of stops with outgoing edges.
    pub fn origin_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of directed edges carrying schedule data.
    pub fn edge_count(&self) -> usize {
        self.schedules.len()
    }
}

/// Incremental [`TransitGraph`] construction from timetable rows.
///
/// Rows must arrive in departure order per directed stop pair; `build`
/// asserts that order rather than sorting.
#[derive(Debug, Clone, Default)]
pub struct TransitGraphBuilder {
    adjacency: HashMap<StopName, Vec<StopName>>,
    schedules: HashMap<(StopName, StopName), Vec<Departure>>,
    coordinates: HashMap<StopName, Coord>,
}

impl TransitGraphBuilder {
    /// Records one timetable row: a scheduled departure from `origin` to
    /// `destination`.
    ///
    /// The destination is added to the origin's adjacency once, however
    /// many departures the pair carries.
    pub fn add_connection(
        &mut self,
        origin: StopName,
        destination: StopName,
        departure: Departure,
    ) -> &mut Self {
        let reachable = self.adjacency.entry(origin.clone()).or_default();
        if !reachable.contains(&destination) {
            reachable.push(destination.clone());
        }
        self.schedules
            .entry((origin, destination))
            .or_default()
            .push(departure);
        self
    }

    /// Records a stop's coordinate. The first value for a stop wins.
    pub fn coordinate(&mut self, stop: StopName, coord: Coord) -> &mut Self {
        self.coordinates.entry(stop).or_insert(coord);
        self
    }

    /// Finalizes the graph, asserting per-edge departure order.
    pub fn build(self) -> Result<TransitGraph, GraphError> {
        TransitGraph::from_parts(self.adjacency, self.schedules, self.coordinates)
    }
}
