//! Multi-stop round-trip optimization.
//!
//! Orders a set of mandatory stops into a minimal round trip by tabu
//! search, using the route search engine as its cost oracle.

mod history;
mod tabu;

pub use history::TabuHistory;
pub use tabu::{TabuConfig, TourCandidate, TourError, TourPlan, TourPlanner, TourRequest};
