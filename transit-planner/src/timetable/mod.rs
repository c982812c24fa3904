//! Timetable storage: per-edge departure schedules and the transit graph.

mod graph;
mod schedule;

pub use graph::{GraphError, ScheduleError, TransitGraph, TransitGraphBuilder};
pub use schedule::{Departure, EdgeSchedule, UnsortedSchedule};
