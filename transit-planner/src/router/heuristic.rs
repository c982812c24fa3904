//! Frontier-priority heuristics.
//!
//! A heuristic biases the A* frontier with an estimate derived from stop
//! coordinates. The stock estimate mixes raw coordinate units into
//! minute-valued costs, which is only admissible when the two happen to be
//! commensurate, so the strategy is a trait: exact searches or a scaled
//! replacement can be swapped in without touching the engine.

use crate::domain::StopName;
use crate::timetable::TransitGraph;

/// Strategy supplying the heuristic term added to frontier priorities.
///
/// The engine evaluates it on the edge being relaxed: `from` is the stop
/// under expansion and `to` the candidate neighbor.
pub trait Heuristic {
    /// Estimate in cost units. Must be non-negative; return 0 for stops
    /// without coordinates rather than failing.
    fn estimate(&self, graph: &TransitGraph, from: &StopName, to: &StopName) -> f64;
}

/// No heuristic: every estimate is zero, making A* exact.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroHeuristic;

impl Heuristic for ZeroHeuristic {
    fn estimate(&self, _graph: &TransitGraph, _from: &StopName, _to: &StopName) -> f64 {
        0.0
    }
}

/// Manhattan distance between the two stops' coordinates, in raw
/// coordinate units.
///
/// The distance is added to minute-valued costs without unit conversion,
/// so with geographic coordinates the estimate is not a guaranteed lower
/// bound and the search degrades to a weighted best-first search. Use
/// [`ScaledManhattan`] to calibrate, or [`ZeroHeuristic`] for exact
/// results.
///
/// A stop missing a coordinate contributes an estimate of 0.
#[derive(Debug, Clone, Copy, Default)]
pub struct ManhattanHeuristic;

impl Heuristic for ManhattanHeuristic {
    fn estimate(&self, graph: &TransitGraph, from: &StopName, to: &StopName) -> f64 {
        match (graph.coordinate(from), graph.coordinate(to)) {
            (Some(a), Some(b)) => a.manhattan_distance(&b),
            _ => 0.0,
        }
    }
}

/// Manhattan distance calibrated into minutes.
///
/// Multiplies the raw distance by `minutes_per_unit`; pick a factor no
/// larger than the network's best speed to keep the estimate admissible.
#[derive(Debug, Clone, Copy)]
pub struct ScaledManhattan {
    /// Conversion factor from coordinate units to cost minutes.
    pub minutes_per_unit: f64,
}

impl Heuristic for ScaledManhattan {
    fn estimate(&self, graph: &TransitGraph, from: &StopName, to: &StopName) -> f64 {
        self.minutes_per_unit * ManhattanHeuristic.estimate(graph, from, to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ClockTime, Coord, LineId};
    use crate::timetable::Departure;

    fn stop(s: &str) -> StopName {
        StopName::new(s).unwrap()
    }

    fn graph() -> TransitGraph {
        let mut builder = TransitGraph::builder();
        builder.add_connection(
            stop("a"),
            stop("b"),
            Departure::new(
                ClockTime::parse("08:00").unwrap(),
                5,
                LineId::new("1").unwrap(),
                ClockTime::parse("08:05").unwrap(),
            ),
        );
        builder.coordinate(stop("a"), Coord::new(1.0, 2.0));
        builder.coordinate(stop("b"), Coord::new(4.0, -2.0));
        builder.build().unwrap()
    }

    #[test]
    fn manhattan_between_known_stops() {
        let graph = graph();
        let estimate = ManhattanHeuristic.estimate(&graph, &stop("a"), &stop("b"));
        assert_eq!(estimate, 7.0);
    }

    #[test]
    fn missing_coordinate_degrades_to_zero() {
        let graph = graph();
        assert_eq!(
            ManhattanHeuristic.estimate(&graph, &stop("a"), &stop("nowhere")),
            0.0
        );
        assert_eq!(
            ManhattanHeuristic.estimate(&graph, &stop("nowhere"), &stop("b")),
            0.0
        );
    }

    #[test]
    fn zero_heuristic_is_zero() {
        let graph = graph();
        assert_eq!(ZeroHeuristic.estimate(&graph, &stop("a"), &stop("b")), 0.0);
    }

    #[test]
    fn scaled_multiplies() {
        let graph = graph();
        let scaled = ScaledManhattan {
            minutes_per_unit: 0.5,
        };
        assert_eq!(scaled.estimate(&graph, &stop("a"), &stop("b")), 3.5);
    }
}
