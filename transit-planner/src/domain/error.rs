//! Domain error types.

/// Domain-level errors for validation and data consistency.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DomainError {
    /// Itinerary has no stops
    #[error("itinerary must visit at least one stop")]
    EmptyItinerary,

    /// Ride count does not bridge the stop sequence
    #[error("itinerary with {stops} stops requires {} rides, got {rides}", stops - 1)]
    LegCountMismatch { stops: usize, rides: usize },
}
