//! Route search engine: cost oracle, heuristics, label-correcting search,
//! and path reconstruction.

mod cost;
mod heuristic;
mod search;

pub use cost::{CostConfig, DEFAULT_TRANSFER_PENALTY, EdgeCost, line_cost, time_cost};
pub use heuristic::{Heuristic, ManhattanHeuristic, ScaledManhattan, ZeroHeuristic};
pub use search::{Route, Router, SearchError, SearchOutcome, SearchVariant};
