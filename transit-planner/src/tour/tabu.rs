//! Multi-stop round-trip optimization by tabu search.
//!
//! Given a start stop and a set of mandatory stops, finds the visiting
//! order minimizing the elapsed time of the full round trip. Each candidate
//! ordering is priced by chaining route searches stop to stop, feeding each
//! segment's arrival time into the next segment's query, so schedule
//! feasibility carries across the whole tour.
//!
//! The neighborhood is exhaustive: every iteration evaluates all `k!`
//! orderings of the `k` mandatory stops, each costing `k + 1` route
//! searches. That bound is intentional for the network sizes this targets;
//! larger instances call for a bounded neighborhood in
//! [`TourPlanner::step`]'s place.

use itertools::Itertools;
use serde::Serialize;
use tracing::debug;

use crate::domain::{ClockTime, StopName};
use crate::router::{Heuristic, Route, Router, SearchError, SearchVariant};

use super::history::TabuHistory;

/// Error from tour planning.
#[derive(Debug, Clone, thiserror::Error)]
pub enum TourError {
    /// Invalid tour request
    #[error("invalid tour request: {0}")]
    InvalidRequest(&'static str),

    /// Route search failed on malformed graph data
    #[error(transparent)]
    Search(#[from] SearchError),
}

/// Request for a multi-stop round trip.
#[derive(Debug, Clone)]
pub struct TourRequest {
    /// Stop the tour departs from and returns to.
    pub start: StopName,
    /// Mandatory stops to visit, order free.
    pub stops: Vec<StopName>,
    /// Earliest departure time.
    pub depart: ClockTime,
}

impl TourRequest {
    /// Create a new tour request.
    pub fn new(start: StopName, stops: Vec<StopName>, depart: ClockTime) -> Self {
        Self {
            start,
            stops,
            depart,
        }
    }

    /// Validate the tour request.
    pub fn validate(&self) -> Result<(), TourError> {
        if self.stops.is_empty() {
            return Err(TourError::InvalidRequest(
                "at least one mandatory stop is required",
            ));
        }
        if self.stops.contains(&self.start) {
            return Err(TourError::InvalidRequest(
                "start must not appear among the mandatory stops",
            ));
        }
        for (index, stop) in self.stops.iter().enumerate() {
            if self.stops[..index].contains(stop) {
                return Err(TourError::InvalidRequest(
                    "mandatory stops must be distinct",
                ));
            }
        }
        Ok(())
    }
}

/// Tabu search parameters.
#[derive(Debug, Clone, Copy)]
pub struct TabuConfig {
    /// Number of outer iterations to run.
    pub iterations: usize,
    /// Iterations a winning ordering stays forbidden.
    pub tenure: u32,
    /// Whether a forbidden ordering may still win an iteration by strictly
    /// beating the best cost ever recorded.
    pub aspiration: bool,
    /// Search variant used to price each tour segment.
    pub variant: SearchVariant,
}

impl Default for TabuConfig {
    fn default() -> Self {
        Self {
            iterations: 10,
            tenure: 3,
            aspiration: true,
            variant: SearchVariant::AStarTime,
        }
    }
}

/// A fully priced candidate ordering.
#[derive(Debug, Clone, Serialize)]
pub struct TourCandidate {
    /// Visiting order of the mandatory stops.
    pub order: Vec<StopName>,
    /// Elapsed minutes from the requested departure to the final return.
    pub total_minutes: f64,
    /// One route per tour segment, including the closing return leg.
    pub segments: Vec<Route>,
}

/// The optimizer's answer: the best ordering found and how the search
/// converged.
#[derive(Debug, Clone, Serialize)]
pub struct TourPlan {
    /// Best visiting order found across all iterations.
    pub order: Vec<StopName>,
    /// Elapsed minutes of the best tour.
    pub total_minutes: f64,
    /// Segment routes of the best tour.
    pub segments: Vec<Route>,
    /// Cost of each iteration's winner; `None` where every ordering was
    /// forbidden or infeasible.
    pub trace: Vec<Option<f64>>,
}

/// Tabu-search tour planner over a [`Router`].
pub struct TourPlanner<'a, H: Heuristic> {
    router: &'a Router<'a, H>,
    config: TabuConfig,
}

impl<'a, H: Heuristic> TourPlanner<'a, H> {
    /// Creates a planner over the given router.
    pub fn new(router: &'a Router<'a, H>, config: TabuConfig) -> Self {
        Self { router, config }
    }

    /// Runs the full tabu search.
    ///
    /// Returns `Ok(None)` when no ordering is feasible at all (some
    /// mandatory stop can never be reached from the requested departure).
    pub fn plan(&self, request: &TourRequest) -> Result<Option<TourPlan>, TourError> {
        request.validate()?;

        let mut history = TabuHistory::new();
        let mut best: Option<TourCandidate> = None;
        let mut trace = Vec::with_capacity(self.config.iterations);

        for iteration in 0..self.config.iterations {
            let best_cost = best.as_ref().map(|b| b.total_minutes);
            let winner = self.step(request, &mut history, best_cost)?;
            debug!(
                iteration,
                winner = winner.as_ref().map(|w| w.total_minutes),
                "tabu iteration finished"
            );

            trace.push(winner.as_ref().map(|w| w.total_minutes));
            if let Some(candidate) = winner {
                if best
                    .as_ref()
                    .is_none_or(|b| candidate.total_minutes <= b.total_minutes)
                {
                    best = Some(candidate);
                }
            }
        }

        Ok(best.map(|b| TourPlan {
            order: b.order,
            total_minutes: b.total_minutes,
            segments: b.segments,
            trace,
        }))
    }

    /// Runs one outer iteration against an explicit history.
    ///
    /// Ages the history, prices every ordering, selects the cheapest
    /// eligible candidate, and forbids it for the configured tenure.
    /// Returns `None` when no candidate was eligible this iteration.
    pub fn step(
        &self,
        request: &TourRequest,
        history: &mut TabuHistory,
        best_cost: Option<f64>,
    ) -> Result<Option<TourCandidate>, TourError> {
        history.age();

        let mut candidates = Vec::new();
        for ordering in request
            .stops
            .iter()
            .permutations(request.stops.len())
        {
            let order: Vec<StopName> = ordering.into_iter().cloned().collect();
            // Infeasible orderings are excluded, never fatal.
            if let Some(candidate) = self.evaluate(request, order)? {
                candidates.push(candidate);
            }
        }

        let winner =
            select_candidate(&candidates, history, best_cost, self.config.aspiration).cloned();
        if let Some(candidate) = &winner {
            history.forbid(candidate.order.clone(), self.config.tenure);
        }
        Ok(winner)
    }

    /// Prices one ordering by chaining route searches around the tour.
    ///
    /// Each segment departs at the previous segment's arrival time. Any
    /// unreachable segment makes the whole ordering infeasible (`None`).
    pub fn evaluate(
        &self,
        request: &TourRequest,
        order: Vec<StopName>,
    ) -> Result<Option<TourCandidate>, TourError> {
        let mut segments = Vec::with_capacity(order.len() + 1);
        let mut from = request.start.clone();
        let mut at = request.depart;

        for goal in order.iter().chain(std::iter::once(&request.start)) {
            let Some(route) = self
                .router
                .find_route(self.config.variant, &from, goal, at)?
            else {
                return Ok(None);
            };
            at = route.arrival;
            from = goal.clone();
            segments.push(route);
        }

        Ok(Some(TourCandidate {
            order,
            total_minutes: at.minutes_since(request.depart) as f64,
            segments,
        }))
    }
}

/// Picks the cheapest eligible candidate.
///
/// A candidate is eligible when its ordering is not forbidden, or (with
/// aspiration enabled) when it strictly beats the best cost recorded so
/// far across the whole run.
fn select_candidate<'c>(
    candidates: &'c [TourCandidate],
    history: &TabuHistory,
    best_cost: Option<f64>,
    aspiration: bool,
) -> Option<&'c TourCandidate> {
    candidates
        .iter()
        .filter(|candidate| {
            if !history.is_forbidden(&candidate.order) {
                return true;
            }
            aspiration && best_cost.is_some_and(|best| candidate.total_minutes < best)
        })
        .min_by(|a, b| a.total_minutes.total_cmp(&b.total_minutes))
}
