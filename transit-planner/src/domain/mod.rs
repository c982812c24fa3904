//! Domain types for the transit planner.
//!
//! This module contains the core domain model types that represent
//! validated transit data. All types enforce their invariants at
//! construction time, so code that receives these types can trust
//! their validity.

mod error;
mod itinerary;
mod leg;
mod line;
mod stop;
mod time;

pub use error::DomainError;
pub use itinerary::{Itinerary, ItineraryLeg};
pub use leg::Leg;
pub use line::{InvalidLineId, LineId};
pub use stop::{Coord, InvalidStopName, StopName};
pub use time::{ClockTime, TimeError};
