//! Edge cost functions.
//!
//! Both cost functions resolve a directed edge and a query time to the
//! earliest usable departure and price it in minutes. Time-cost charges
//! waiting plus riding; line-cost additionally charges a flat penalty for
//! boarding a different line than the one that reached the origin.

use crate::domain::{ClockTime, Leg, LineId, StopName};
use crate::timetable::{ScheduleError, TransitGraph};

/// Default transfer penalty in cost minutes.
///
/// Large enough to dominate ordinary route costs, so transfer-averse
/// searches change lines only when no single-line route exists.
pub const DEFAULT_TRANSFER_PENALTY: f64 = 600.0;

/// Cost model parameters.
#[derive(Debug, Clone, Copy)]
pub struct CostConfig {
    /// Flat surcharge applied once per line change by
    /// [`line_cost`]. Subtract it back out per transfer to recover pure
    /// travel time from a transfer-averse total.
    pub transfer_penalty: f64,
}

impl Default for CostConfig {
    fn default() -> Self {
        Self {
            transfer_penalty: DEFAULT_TRANSFER_PENALTY,
        }
    }
}

/// A priced edge traversal: the cost in model units and the concrete ride
/// behind it.
///
/// The leg always carries the true line and times regardless of any
/// penalty folded into `minutes`, so reconstruction stays exact.
#[derive(Debug, Clone)]
pub struct EdgeCost {
    /// Cost in cost-model units (minutes, plus any transfer penalty).
    pub minutes: f64,
    /// The ride that realizes this cost.
    pub leg: Leg,
}

/// Time-cost of traversing `from -> to` when standing at `from` at `at`.
///
/// Picks the earliest departure at or after `at` and charges waiting plus
/// riding: `travel_minutes + (departure - at)` in whole minutes.
///
/// Returns `Ok(None)` when the edge's schedule is exhausted for this query
/// time; the edge is simply unusable now. A pair with no schedule at all is
/// a data error and fails hard.
pub fn time_cost(
    graph: &TransitGraph,
    from: &StopName,
    to: &StopName,
    at: ClockTime,
) -> Result<Option<EdgeCost>, ScheduleError> {
    let schedule = graph.timetable(from, to)?;
    Ok(schedule.earliest_at(at).map(|entry| EdgeCost {
        minutes: (entry.travel_minutes - at.minutes_since(entry.departure)) as f64,
        leg: Leg::new(entry.line.clone(), entry.departure, entry.arrival),
    }))
}

/// Line-cost of traversing `from -> to`: time-cost plus a transfer
/// surcharge when the chosen departure is on a different line than
/// `prev_line`.
///
/// `prev_line` is the line that reached `from`; `None` (the search start,
/// where no line has been boarded yet) never incurs the penalty. The
/// penalty is added exactly once per change, so callers can recover pure
/// travel time by subtracting `penalty × transfers`.
pub fn line_cost(
    graph: &TransitGraph,
    from: &StopName,
    to: &StopName,
    at: ClockTime,
    prev_line: Option<&LineId>,
    config: &CostConfig,
) -> Result<Option<EdgeCost>, ScheduleError> {
    Ok(time_cost(graph, from, to, at)?.map(|mut edge| {
        if prev_line.is_some_and(|line| *line != edge.leg.line) {
            edge.minutes += config.transfer_penalty;
        }
        edge
    }))
}
