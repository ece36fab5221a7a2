//! The routing problem handed to a [`RouteSolver`][crate::RouteSolver].
//!
//! # Model
//!
//! - One vehicle; its path starts and ends at node 0.
//! - Arc cost = integral distance between the two nodes.
//! - A cumulative "distance" resource starts at zero at the depot and may
//!   not exceed `max_distance` anywhere on the route.
//! - With dropping allowed, every node `1..=k` sits in its own disjunction:
//!   visiting it is optional, skipping it costs `drop_penalty`.
//! - Without dropping, every node is mandatory; if no route fits the budget
//!   the problem is infeasible.
//!
//! Objective of a route:
//!
//! ```text
//! (1 + span_cost_coefficient) * route_distance + drop_penalty * |dropped|
//! ```

use std::time::Duration;

use ods_core::{SearchParameters, StopIndex, Trip};
use ods_region::ServiceRegion;

use crate::{RoutingError, RoutingResult};

/// Index of the depot node in every problem.
pub const DEPOT: usize = 0;

/// A formulated single-vehicle routing problem.
#[derive(Clone, Debug, PartialEq)]
pub struct RoutingProblem {
    /// Region stop of each node; `locations[0]` is the depot.
    pub locations:             Vec<StopIndex>,
    /// `(k+1) × (k+1)` truncated distances, ordered like `locations`.
    pub distances:             Vec<Vec<i64>>,
    pub max_distance:          i64,
    pub allow_dropping:        bool,
    pub drop_penalty:          i64,
    pub span_cost_coefficient: i64,
    /// Wall-clock budget; a solver returns its best result once it elapses.
    pub time_limit:            Duration,
    pub log_search:            bool,
}

/// Build the routing problem for `candidates` over `region`.
///
/// Node order follows `candidates`.  Search settings start from
/// [`SearchParameters::default`] with a 30 s budget; override them with
/// [`RoutingProblem::with_search`].
pub fn formulate<'t>(
    region:         &ServiceRegion,
    candidates:     impl IntoIterator<Item = &'t Trip>,
    max_distance:   i64,
    allow_dropping: bool,
) -> RoutingResult<RoutingProblem> {
    if max_distance < 0 {
        return Err(RoutingError::NegativeBudget(max_distance));
    }

    let depot = region.fixed_stop();
    let mut locations = vec![depot];
    for trip in candidates {
        if trip.location_index == depot {
            return Err(RoutingError::TripAtDepot(trip.id));
        }
        locations.push(trip.location_index);
    }

    let distances = region.distance_matrix().truncated_submatrix(&locations)?;
    let search = SearchParameters::default();

    Ok(RoutingProblem {
        locations,
        distances,
        max_distance,
        allow_dropping,
        drop_penalty:          search.drop_penalty,
        span_cost_coefficient: search.span_cost_coefficient,
        time_limit:            Duration::from_secs(SearchParameters::DEFAULT_TIME_LIMIT_SECS),
        log_search:            search.log_search,
    })
}

impl RoutingProblem {
    /// Apply solver knobs from the configuration.
    pub fn with_search(mut self, search: &SearchParameters, time_limit: Duration) -> Self {
        self.drop_penalty = search.drop_penalty;
        self.span_cost_coefficient = search.span_cost_coefficient;
        self.log_search = search.log_search;
        self.time_limit = time_limit;
        self
    }

    /// Depot plus candidates.
    #[inline]
    pub fn num_nodes(&self) -> usize {
        self.locations.len()
    }

    /// Number of candidate (non-depot) nodes.
    #[inline]
    pub fn num_candidates(&self) -> usize {
        self.locations.len() - 1
    }

    /// A problem with no candidates; its only route is `0 -> 0`.
    #[inline]
    pub fn is_trivial(&self) -> bool {
        self.num_candidates() == 0
    }

    /// Candidate node indices `1..=k`.
    pub fn candidate_nodes(&self) -> impl Iterator<Item = usize> {
        1..self.num_nodes()
    }

    #[inline]
    pub fn arc(&self, from: usize, to: usize) -> i64 {
        self.distances[from][to]
    }

    /// `true` if `arc(i, j) == arc(j, i)` for every pair.
    pub fn is_symmetric(&self) -> bool {
        let n = self.num_nodes();
        (0..n).all(|i| ((i + 1)..n).all(|j| self.distances[i][j] == self.distances[j][i]))
    }

    /// Sum of arc costs along `route`.
    pub fn route_distance(&self, route: &[usize]) -> i64 {
        route.windows(2).map(|w| self.arc(w[0], w[1])).sum()
    }

    /// Objective value of a route of length `distance` that leaves
    /// `dropped` nodes out.
    #[inline]
    pub fn objective(&self, distance: i64, dropped: usize) -> i64 {
        (1 + self.span_cost_coefficient) * distance + self.drop_penalty * dropped as i64
    }
}
