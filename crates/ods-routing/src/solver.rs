//! The `RouteSolver` seam and what a solver hands back.

use std::time::Duration;

use rustc_hash::FxHashSet;
use thiserror::Error;

use crate::{RoutingProblem, DEPOT};

// ── SolveError ───────────────────────────────────────────────────────────────

/// Why a solve produced no usable route.
///
/// None of these abort a run; the simulation records them and rejects
/// every candidate.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SolveError {
    /// The constraints admit no route (only possible without dropping).
    #[error("no route satisfies the constraints")]
    Infeasible,

    /// The time budget ran out before any solution was found.
    #[error("no solution found within {elapsed:?}")]
    NoSolution { elapsed: Duration },

    /// The backend itself failed.
    #[error("solver backend failed: {0}")]
    Backend(String),

    /// The backend returned a route that breaks the problem's rules.
    #[error("solver returned an invalid route: {0}")]
    InvalidOutcome(String),
}

// ── RouteOutcome ─────────────────────────────────────────────────────────────

/// A successful solve.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteOutcome {
    /// Visited nodes in order, starting and ending at the depot.
    pub route:          Vec<usize>,
    pub objective:      i64,
    /// Candidate nodes left off the route, ascending.
    pub dropped:        Vec<usize>,
    pub elapsed:        Duration,
    /// The search stopped because the time budget ran out.
    pub hit_time_limit: bool,
}

impl RouteOutcome {
    /// The only outcome of a problem with no candidates: `0 -> 0`.
    pub fn trivial() -> Self {
        Self {
            route:          vec![DEPOT, DEPOT],
            objective:      0,
            dropped:        Vec::new(),
            elapsed:        Duration::ZERO,
            hit_time_limit: false,
        }
    }

    /// Distance of the route under `problem`'s matrix.
    pub fn route_distance(&self, problem: &RoutingProblem) -> i64 {
        problem.route_distance(&self.route)
    }

    /// Candidate nodes on the route, in visiting order.
    pub fn visited(&self) -> &[usize] {
        match self.route.len() {
            0..=2 => &[],
            n => &self.route[1..n - 1],
        }
    }

    /// Check the outcome against `problem`.
    ///
    /// The route must start and end at the depot and visit each candidate
    /// at most once.  Visited and dropped nodes together must cover every
    /// candidate exactly once.  Nothing may be dropped when dropping is
    /// disallowed, and the route must fit the distance budget.
    pub fn validate(&self, problem: &RoutingProblem) -> Result<(), SolveError> {
        let invalid = |msg: String| Err(SolveError::InvalidOutcome(msg));

        if self.route.len() < 2 {
            return invalid(format!("route {:?} is too short", self.route));
        }
        if self.route.first() != Some(&DEPOT) || self.route.last() != Some(&DEPOT) {
            return invalid(format!("route {:?} does not start and end at the depot", self.route));
        }

        let n = problem.num_nodes();
        let mut seen = FxHashSet::with_capacity_and_hasher(n, Default::default());
        for &node in self.visited() {
            if node == DEPOT || node >= n {
                return invalid(format!("route visits node {node} outside 1..{n}"));
            }
            if !seen.insert(node) {
                return invalid(format!("route visits node {node} twice"));
            }
        }
        for &node in &self.dropped {
            if node == DEPOT || node >= n {
                return invalid(format!("dropped node {node} outside 1..{n}"));
            }
            if !seen.insert(node) {
                return invalid(format!("node {node} is both routed and dropped"));
            }
        }
        if seen.len() != problem.num_candidates() {
            return invalid(format!(
                "{} of {} candidates accounted for",
                seen.len(),
                problem.num_candidates()
            ));
        }
        if !problem.allow_dropping && !self.dropped.is_empty() {
            return invalid(format!("dropped {:?} although dropping is disallowed", self.dropped));
        }

        let distance = problem.route_distance(&self.route);
        if distance > problem.max_distance {
            return invalid(format!(
                "route distance {distance} exceeds budget {}",
                problem.max_distance
            ));
        }
        Ok(())
    }
}

// ── RouteSolver ──────────────────────────────────────────────────────────────

/// A routing backend.
///
/// Implementations must honour `problem.time_limit` on a best-effort basis
/// and return the best route found when it elapses.  They are shared across
/// batch worker threads, hence `Send + Sync`.
pub trait RouteSolver: Send + Sync {
    fn solve(&self, problem: &RoutingProblem) -> Result<RouteOutcome, SolveError>;

    /// Short name for logs and result files.
    fn name(&self) -> &str {
        "custom"
    }
}

impl<S: RouteSolver + ?Sized> RouteSolver for &S {
    fn solve(&self, problem: &RoutingProblem) -> Result<RouteOutcome, SolveError> {
        (**self).solve(problem)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<S: RouteSolver + ?Sized> RouteSolver for Box<S> {
    fn solve(&self, problem: &RoutingProblem) -> Result<RouteOutcome, SolveError> {
        (**self).solve(problem)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
