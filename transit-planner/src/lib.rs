//! Route planning over scheduled public transit.
//!
//! Answers two questions about a timetabled transit network:
//!
//! - "Leaving this stop at this time, what is the best route to that
//!   stop?" A time-dependent shortest path, where an edge's cost is the
//!   waiting plus riding time of the earliest usable departure, optionally
//!   penalizing line changes.
//! - "In what order should I visit these stops and return?" A tabu search
//!   over visiting orders, pricing each by chained route searches.
//!
//! Timetable ingestion and result presentation live outside this crate:
//! callers feed pre-parsed timetable rows into a
//! [`timetable::TransitGraphBuilder`] and render the structured
//! [`router::Route`] / [`tour::TourPlan`] values however they like.

pub mod domain;
pub mod router;
pub mod timetable;
pub mod tour;
