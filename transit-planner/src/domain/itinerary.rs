//! Itinerary types.
//!
//! An `Itinerary` is the ordered result of one completed search: the stops
//! visited and the rides between them, bracketed by terminus markers so the
//! two sequences zip 1:1.

use std::collections::HashSet;

use serde::Serialize;

use super::{ClockTime, DomainError, Leg, StopName};

/// One element of an itinerary's leg sequence.
///
/// The interior elements are the actual rides; the first and last elements
/// are degenerate markers naming the start and goal stops, kept so that the
/// leg sequence is exactly one longer than the stop sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ItineraryLeg {
    /// Start or goal bookend, carrying only the stop name.
    Terminus(StopName),
    /// A scheduled ride between two adjacent stops.
    Ride(Leg),
}

/// A completed route: ordered stops plus the legs connecting them.
///
/// # Invariants
///
/// - `stops` is non-empty.
/// - For two or more stops, `legs.len() == stops.len() + 1`: a `Terminus`
///   marker for the start, one `Ride` per adjacent stop pair, and a
///   `Terminus` marker for the goal.
/// - A single-stop itinerary (start equals goal) has no legs at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Itinerary {
    stops: Vec<StopName>,
    legs: Vec<ItineraryLeg>,
}

impl Itinerary {
    /// Builds an itinerary from the visited stops and the rides between them.
    ///
    /// `rides` must contain exactly one entry per adjacent stop pair. The
    /// terminus markers are added here.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `stops` is empty or the ride count does not match
    /// the stop count.
    pub fn from_rides(stops: Vec<StopName>, rides: Vec<Leg>) -> Result<Self, DomainError> {
        let Some(first) = stops.first() else {
            return Err(DomainError::EmptyItinerary);
        };
        if stops.len() == 1 {
            if !rides.is_empty() {
                return Err(DomainError::LegCountMismatch {
                    stops: stops.len(),
                    rides: rides.len(),
                });
            }
            return Ok(Self {
                stops,
                legs: Vec::new(),
            });
        }
        if rides.len() != stops.len() - 1 {
            return Err(DomainError::LegCountMismatch {
                stops: stops.len(),
                rides: rides.len(),
            });
        }

        let last = stops.last().expect("checked non-empty");
        let mut legs = Vec::with_capacity(rides.len() + 2);
        legs.push(ItineraryLeg::Terminus(first.clone()));
        legs.extend(rides.into_iter().map(ItineraryLeg::Ride));
        legs.push(ItineraryLeg::Terminus(last.clone()));

        Ok(Self { stops, legs })
    }

    /// Builds the degenerate single-stop itinerary (start equals goal).
    pub fn single(stop: StopName) -> Self {
        Self {
            stops: vec![stop],
            legs: Vec::new(),
        }
    }

    /// The stops in travel order.
    pub fn stops(&self) -> &[StopName] {
        &self.stops
    }

    /// The full leg sequence including terminus markers.
    pub fn legs(&self) -> &[ItineraryLeg] {
        &self.legs
    }

    /// The interior ride legs, in travel order.
    pub fn rides(&self) -> impl Iterator<Item = &Leg> {
        self.legs.iter().filter_map(|leg| match leg {
            ItineraryLeg::Ride(ride) => Some(ride),
            ItineraryLeg::Terminus(_) => None,
        })
    }

    /// The start stop.
    pub fn start(&self) -> &StopName {
        &self.stops[0]
    }

    /// The goal stop.
    pub fn goal(&self) -> &StopName {
        self.stops.last().expect("stops is non-empty")
    }

    /// Arrival time of the final ride, if the itinerary has any rides.
    pub fn final_arrival(&self) -> Option<ClockTime> {
        self.rides().last().map(|leg| leg.arrival)
    }

    /// Number of line changes along the route.
    ///
    /// Counted as the number of distinct lines among the rides minus one;
    /// an itinerary riding a single line throughout (or with no rides)
    /// has zero changes.
    pub fn transfer_count(&self) -> usize {
        let distinct: HashSet<_> = self.rides().map(|leg| &leg.line).collect();
        distinct.len().saturating_sub(1)
    }
}
