//! Time-dependent route search.
//!
//! One label-correcting loop implements plain Dijkstra and both A*
//! variants; they differ only in how frontier priorities are computed.
//! Edge costs depend on the arrival time already recorded at the stop
//! being expanded, which is what makes the search time-dependent: the
//! same edge prices differently at 08:00 and at 16:00.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use ordered_float::OrderedFloat;
use serde::Serialize;
use tracing::{debug, trace};

use crate::domain::{ClockTime, Itinerary, Leg, LineId, StopName};
use crate::timetable::{ScheduleError, TransitGraph};

use super::cost::{CostConfig, EdgeCost, line_cost, time_cost};
use super::heuristic::Heuristic;

/// Error from a route search.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SearchError {
    /// The graph's adjacency references an edge with no timetable data.
    /// Malformed construction; the search that touched it is aborted.
    #[error(transparent)]
    Schedule(#[from] ScheduleError),
}

/// Which search to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchVariant {
    /// Time-cost, no heuristic: exact minimum elapsed minutes.
    Dijkstra,
    /// Time-cost plus the heuristic term on the frontier priority.
    AStarTime,
    /// Line-cost (transfer penalty included) plus the heuristic term.
    AStarLines,
}

/// The label state left behind by one search run.
///
/// Holds the best cost, arrival time, and predecessor link recorded for
/// every stop the search labeled. Lives exactly as long as the caller
/// needs to read costs and reconstruct a route.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    start: StopName,
    goal: StopName,
    predecessors: HashMap<StopName, (StopName, Leg)>,
    costs: HashMap<StopName, f64>,
    arrivals: HashMap<StopName, ClockTime>,
}

impl SearchOutcome {
    /// The stop the search departed from.
    pub fn start(&self) -> &StopName {
        &self.start
    }

    /// The stop the search was aiming for.
    pub fn goal(&self) -> &StopName {
        &self.goal
    }

    /// Best known cost to reach `stop`, if it was labeled.
    pub fn cost_to(&self, stop: &StopName) -> Option<f64> {
        self.costs.get(stop).copied()
    }

    /// Arrival time recorded at `stop`, if it was labeled.
    ///
    /// For the start stop this is the original query time.
    pub fn arrival_at(&self, stop: &StopName) -> Option<ClockTime> {
        self.arrivals.get(stop).copied()
    }

    /// The predecessor link recorded for `stop`: the stop it was reached
    /// from and the ride taken.
    pub fn predecessor(&self, stop: &StopName) -> Option<&(StopName, Leg)> {
        self.predecessors.get(stop)
    }

    /// Walks the predecessor map back from the goal into an ordered
    /// itinerary.
    ///
    /// Returns `None` when the goal was never labeled (unreachable). A
    /// search from a stop to itself yields the single-stop itinerary with
    /// no legs.
    pub fn reconstruct(&self) -> Option<Itinerary> {
        if self.goal == self.start {
            return Some(Itinerary::single(self.start.clone()));
        }
        self.predecessors.get(&self.goal)?;

        let mut stops = vec![self.goal.clone()];
        let mut rides = Vec::new();
        let mut current = self.goal.clone();
        while current != self.start {
            let (previous, leg) = self
                .predecessors
                .get(&current)
                .expect("every labeled stop links back to the start");
            rides.push(leg.clone());
            current = previous.clone();
            stops.push(current.clone());
        }
        stops.reverse();
        rides.reverse();

        Some(
            Itinerary::from_rides(stops, rides)
                .expect("ride count matches stop count by construction"),
        )
    }
}

/// A reconstructed route with its cost.
#[derive(Debug, Clone, Serialize)]
pub struct Route {
    /// Stops visited and legs ridden.
    pub itinerary: Itinerary,
    /// Total cost in the units of the search variant that produced it
    /// (minutes, plus transfer penalties for [`SearchVariant::AStarLines`]).
    pub cost: f64,
    /// Arrival time at the goal; equals the query time for a degenerate
    /// start-equals-goal route.
    pub arrival: ClockTime,
}

impl Route {
    /// Recovers pure travel time from a transfer-averse total by
    /// subtracting `penalty` once per line change.
    pub fn travel_minutes(&self, penalty: f64) -> f64 {
        self.cost - penalty * self.itinerary.transfer_count() as f64
    }
}

/// Frontier entry: priority orders the heap, the cumulative cost detects
/// staleness after better labels arrive.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct FrontierEntry {
    priority: OrderedFloat<f64>,
    cost: OrderedFloat<f64>,
    stop: StopName,
}

/// Route searcher over an immutable transit graph.
///
/// Borrows the graph, a heuristic strategy, and cost parameters; every
/// search allocates its own label state, so one router can serve any
/// number of sequential (or, behind a shared reference, concurrent)
/// queries.
pub struct Router<'g, H: Heuristic> {
    graph: &'g TransitGraph,
    heuristic: &'g H,
    cost_config: CostConfig,
}

impl<'g, H: Heuristic> Router<'g, H> {
    /// Creates a router with the given heuristic and cost parameters.
    pub fn new(graph: &'g TransitGraph, heuristic: &'g H, cost_config: CostConfig) -> Self {
        Self {
            graph,
            heuristic,
            cost_config,
        }
    }

    /// The cost parameters this router searches with.
    pub fn cost_config(&self) -> &CostConfig {
        &self.cost_config
    }

    /// Minimum-elapsed-minutes search without heuristic guidance.
    pub fn dijkstra(
        &self,
        start: &StopName,
        goal: &StopName,
        depart: ClockTime,
    ) -> Result<SearchOutcome, SearchError> {
        self.search(SearchVariant::Dijkstra, start, goal, depart)
    }

    /// Heuristic-guided search on time-cost.
    pub fn astar_time(
        &self,
        start: &StopName,
        goal: &StopName,
        depart: ClockTime,
    ) -> Result<SearchOutcome, SearchError> {
        self.search(SearchVariant::AStarTime, start, goal, depart)
    }

    /// Heuristic-guided search on line-cost (transfer-averse).
    pub fn astar_lines(
        &self,
        start: &StopName,
        goal: &StopName,
        depart: ClockTime,
    ) -> Result<SearchOutcome, SearchError> {
        self.search(SearchVariant::AStarLines, start, goal, depart)
    }

    /// Runs a search and reconstructs the route to the goal.
    ///
    /// `Ok(None)` when the goal is unreachable from `start` at `depart`.
    pub fn find_route(
        &self,
        variant: SearchVariant,
        start: &StopName,
        goal: &StopName,
        depart: ClockTime,
    ) -> Result<Option<Route>, SearchError> {
        let outcome = self.search(variant, start, goal, depart)?;
        let Some(itinerary) = outcome.reconstruct() else {
            return Ok(None);
        };
        let cost = outcome
            .cost_to(goal)
            .expect("goal is labeled when reconstruction succeeds");
        let arrival = outcome
            .arrival_at(goal)
            .expect("goal is labeled when reconstruction succeeds");
        Ok(Some(Route {
            itinerary,
            cost,
            arrival,
        }))
    }

    /// The label-correcting search shared by all three variants.
    pub fn search(
        &self,
        variant: SearchVariant,
        start: &StopName,
        goal: &StopName,
        depart: ClockTime,
    ) -> Result<SearchOutcome, SearchError> {
        debug!(%start, %goal, %depart, ?variant, "starting route search");

        let mut frontier = BinaryHeap::new();
        frontier.push(Reverse(FrontierEntry {
            priority: OrderedFloat(0.0),
            cost: OrderedFloat(0.0),
            stop: start.clone(),
        }));

        let mut costs = HashMap::from([(start.clone(), 0.0)]);
        let mut arrivals = HashMap::from([(start.clone(), depart)]);
        let mut predecessors: HashMap<StopName, (StopName, Leg)> = HashMap::new();
        // Line used to reach each stop; consulted only by AStarLines.
        let mut lines: HashMap<StopName, LineId> = HashMap::new();

        while let Some(Reverse(entry)) = frontier.pop() {
            let current = entry.stop;

            // A better label arrived after this entry was pushed.
            let best = costs.get(&current).copied().unwrap_or(f64::INFINITY);
            if entry.cost.0 > best {
                continue;
            }

            if current == *goal {
                break;
            }

            // Dead end: no outgoing edges from this stop.
            let Some(neighbors) = self.graph.neighbors(&current) else {
                continue;
            };

            let at = arrivals[&current];
            let current_cost = costs[&current];
            let prev_line = lines.get(&current).cloned();

            for next in neighbors {
                let priced = self.price_edge(variant, &current, next, at, prev_line.as_ref())?;
                // Schedule exhausted for this query time: edge unusable now.
                let Some(edge) = priced else {
                    continue;
                };

                let new_cost = current_cost + edge.minutes;
                let known = costs.get(next).copied().unwrap_or(f64::INFINITY);
                if new_cost >= known {
                    continue;
                }

                trace!(%current, %next, new_cost, "relaxed edge");
                costs.insert(next.clone(), new_cost);
                arrivals.insert(next.clone(), edge.leg.arrival);
                if variant == SearchVariant::AStarLines {
                    lines.insert(next.clone(), edge.leg.line.clone());
                }
                predecessors.insert(next.clone(), (current.clone(), edge.leg));

                let priority = match variant {
                    SearchVariant::Dijkstra => new_cost,
                    SearchVariant::AStarTime | SearchVariant::AStarLines => {
                        new_cost + self.heuristic.estimate(self.graph, &current, next)
                    }
                };
                frontier.push(Reverse(FrontierEntry {
                    priority: OrderedFloat(priority),
                    cost: OrderedFloat(new_cost),
                    stop: next.clone(),
                }));
            }
        }

        debug!(labeled = costs.len(), "route search finished");
        Ok(SearchOutcome {
            start: start.clone(),
            goal: goal.clone(),
            predecessors,
            costs,
            arrivals,
        })
    }

    fn price_edge(
        &self,
        variant: SearchVariant,
        from: &StopName,
        to: &StopName,
        at: ClockTime,
        prev_line: Option<&LineId>,
    ) -> Result<Option<EdgeCost>, ScheduleError> {
        match variant {
            SearchVariant::Dijkstra | SearchVariant::AStarTime => {
                time_cost(self.graph, from, to, at)
            }
            SearchVariant::AStarLines => {
                line_cost(self.graph, from, to, at, prev_line, &self.cost_config)
            }
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::router::heuristic::ZeroHeuristic;
    use crate::timetable::Departure;
    use proptest::prelude::*;
    use std::collections::HashMap;

    fn stop(i: usize) -> StopName {
        StopName::new(&format!("s{i}")).unwrap()
    }

    fn minute(m: u32) -> ClockTime {
        ClockTime::hm(m / 60, m % 60).unwrap()
    }

    /// Raw edge: (from, to, departure minute, travel minutes).
    type RawEdge = (usize, usize, u32, u32);

    fn build_graph(edges: &[RawEdge]) -> TransitGraph {
        let mut per_pair: HashMap<(usize, usize), Vec<(u32, u32)>> = HashMap::new();
        for &(from, to, dep, travel) in edges {
            if from != to {
                per_pair.entry((from, to)).or_default().push((dep, travel));
            }
        }

        let mut builder = TransitGraph::builder();
        for ((from, to), mut departures) in per_pair {
            departures.sort_unstable();
            for (dep, travel) in departures {
                builder.add_connection(
                    stop(from),
                    stop(to),
                    Departure::new(
                        minute(dep),
                        i64::from(travel),
                        LineId::new(&format!("L{}", (dep + travel) % 4)).unwrap(),
                        minute(dep + travel),
                    ),
                );
            }
        }
        builder.build().unwrap()
    }

    fn edges_strategy() -> impl Strategy<Value = Vec<RawEdge>> {
        proptest::collection::vec(
            (0usize..6, 0usize..6, 0u32..1380, 1u32..45),
            1..25,
        )
    }

    proptest! {
        /// With a zero heuristic everywhere, Dijkstra and A*-by-time must
        /// agree on the optimal cost to every labeled stop.
        #[test]
        fn dijkstra_agrees_with_unguided_astar(
            edges in edges_strategy(),
            start in 0usize..6,
            goal in 0usize..6,
            depart in 0u32..1440,
        ) {
            let graph = build_graph(&edges);
            let router = Router::new(&graph, &ZeroHeuristic, CostConfig::default());

            let plain = router
                .dijkstra(&stop(start), &stop(goal), minute(depart))
                .unwrap();
            let guided = router
                .astar_time(&stop(start), &stop(goal), minute(depart))
                .unwrap();

            prop_assert_eq!(plain.cost_to(&stop(goal)), guided.cost_to(&stop(goal)));
        }

        /// Recorded costs are never negative, and predecessor links always
        /// lead back to labeled stops.
        #[test]
        fn labels_are_consistent(
            edges in edges_strategy(),
            start in 0usize..6,
            goal in 0usize..6,
            depart in 0u32..1440,
        ) {
            let graph = build_graph(&edges);
            let router = Router::new(&graph, &ZeroHeuristic, CostConfig::default());
            let outcome = router
                .dijkstra(&stop(start), &stop(goal), minute(depart))
                .unwrap();

            for i in 0..6 {
                let name = stop(i);
                if let Some(cost) = outcome.cost_to(&name) {
                    prop_assert!(cost >= 0.0);
                    prop_assert!(outcome.arrival_at(&name).is_some());
                }
                if let Some((previous, _)) = outcome.predecessor(&name) {
                    prop_assert!(outcome.cost_to(previous).is_some());
                }
            }
        }

        /// Whenever a route exists, its rides chain: each departure is at
        /// or after the previous arrival, and no departure precedes the
        /// query time.
        #[test]
        fn routes_are_temporally_feasible(
            edges in edges_strategy(),
            start in 0usize..6,
            goal in 0usize..6,
            depart in 0u32..1440,
        ) {
            let graph = build_graph(&edges);
            let router = Router::new(&graph, &ZeroHeuristic, CostConfig::default());

            if let Some(route) = router
                .find_route(SearchVariant::Dijkstra, &stop(start), &stop(goal), minute(depart))
                .unwrap()
            {
                let mut available = minute(depart);
                for leg in route.itinerary.rides() {
                    prop_assert!(leg.departure >= available);
                    available = leg.arrival;
                }
            }
        }
    }
}
