//! Default deterministic routing backend.
//!
//! # Algorithm
//!
//! 1. **Construction** — cheapest insertion.  Repeatedly insert the
//!    unrouted node whose best position adds the least distance.  With
//!    dropping allowed, a node is only inserted when it fits the distance
//!    budget and its weighted insertion cost does not exceed the drop
//!    penalty; without dropping every node is inserted.
//! 2. **Improvement** — first-improvement local search over relocate,
//!    2-opt (symmetric matrices only), drop, and re-insert moves, repeated
//!    until no move improves the objective or the time budget runs out.
//!
//! No randomness is involved: identical problems give identical routes.

use std::time::Instant;

use tracing::debug;

use crate::{RouteOutcome, RouteSolver, RoutingProblem, SolveError, DEPOT};

/// Cheapest insertion followed by local search.
#[derive(Copy, Clone, Debug, Default)]
pub struct InsertionSolver;

impl InsertionSolver {
    pub fn new() -> Self {
        Self
    }
}

impl RouteSolver for InsertionSolver {
    fn solve(&self, problem: &RoutingProblem) -> Result<RouteOutcome, SolveError> {
        let start = Instant::now();
        if problem.is_trivial() {
            return Ok(RouteOutcome { elapsed: start.elapsed(), ..RouteOutcome::trivial() });
        }

        let mut search = Search::new(problem, start);
        let constructed = search.construct();
        if !constructed && !problem.allow_dropping {
            return Err(SolveError::NoSolution { elapsed: start.elapsed() });
        }
        if constructed {
            search.improve();
        }

        let distance = problem.route_distance(&search.route);
        debug_assert_eq!(distance, search.distance);
        if distance > problem.max_distance {
            return Err(SolveError::Infeasible);
        }

        let dropped: Vec<usize> = problem.candidate_nodes().filter(|&n| !search.routed[n]).collect();
        let outcome = RouteOutcome {
            objective: problem.objective(distance, dropped.len()),
            route: search.route,
            dropped,
            elapsed: start.elapsed(),
            hit_time_limit: search.expired,
        };
        debug!(
            nodes = problem.num_nodes(),
            visited = outcome.visited().len(),
            dropped = outcome.dropped.len(),
            distance,
            objective = outcome.objective,
            "insertion search finished"
        );
        Ok(outcome)
    }

    fn name(&self) -> &str {
        "insertion"
    }
}

// ── Search state ─────────────────────────────────────────────────────────────

struct Search<'p> {
    p:         &'p RoutingProblem,
    route:     Vec<usize>,
    routed:    Vec<bool>,
    distance:  i64,
    /// `None` when the budget reaches past what `Instant` can represent.
    deadline:  Option<Instant>,
    expired:   bool,
    symmetric: bool,
}

impl<'p> Search<'p> {
    fn new(p: &'p RoutingProblem, start: Instant) -> Self {
        let mut routed = vec![false; p.num_nodes()];
        routed[DEPOT] = true;
        Self {
            p,
            route: vec![DEPOT, DEPOT],
            routed,
            distance: 0,
            deadline: start.checked_add(p.time_limit),
            expired: false,
            symmetric: p.is_symmetric(),
        }
    }

    fn out_of_time(&mut self) -> bool {
        if !self.expired && self.deadline.is_some_and(|d| Instant::now() >= d) {
            self.expired = true;
            debug!(limit = ?self.p.time_limit, "routing time budget exhausted");
        }
        self.expired
    }

    /// Weighted cost of adding `delta` distance to the route.
    #[inline]
    fn weighted(&self, delta: i64) -> i64 {
        (1 + self.p.span_cost_coefficient) * delta
    }

    /// Extra distance from putting `node` between `route[pos-1]` and `route[pos]`.
    #[inline]
    fn insertion_delta(&self, route: &[usize], node: usize, pos: usize) -> i64 {
        let (a, b) = (route[pos - 1], route[pos]);
        self.p.arc(a, node) + self.p.arc(node, b) - self.p.arc(a, b)
    }

    /// Cheapest position for `node` in `route`; ties go to the earliest.
    fn best_position(&self, route: &[usize], node: usize) -> Option<(usize, i64)> {
        (1..route.len())
            .map(|pos| (pos, self.insertion_delta(route, node, pos)))
            .min_by_key(|&(_, delta)| delta)
    }

    /// Distance saved by removing the node at `pos`.
    #[inline]
    fn removal_saving(&self, pos: usize) -> i64 {
        let (a, node, b) = (self.route[pos - 1], self.route[pos], self.route[pos + 1]);
        self.p.arc(a, node) + self.p.arc(node, b) - self.p.arc(a, b)
    }

    fn admits_insertion(&self, delta: i64) -> bool {
        if !self.p.allow_dropping {
            return true;
        }
        self.distance + delta <= self.p.max_distance && self.weighted(delta) <= self.p.drop_penalty
    }

    fn log_move(&self, kind: &str, node: usize) {
        if self.p.log_search {
            debug!(kind, node, distance = self.distance, "route improved");
        }
    }

    // ── Construction ─────────────────────────────────────────────────────────

    /// Insert unrouted nodes until none qualifies.  Returns `false` if the
    /// time budget ran out first.
    fn construct(&mut self) -> bool {
        loop {
            if self.out_of_time() {
                return false;
            }
            let mut best: Option<(usize, usize, i64)> = None;
            for node in self.p.candidate_nodes().filter(|&n| !self.routed[n]) {
                let Some((pos, delta)) = self.best_position(&self.route, node) else {
                    continue;
                };
                if !self.admits_insertion(delta) {
                    continue;
                }
                if best.is_none_or(|(_, _, d)| delta < d) {
                    best = Some((node, pos, delta));
                }
            }
            let Some((node, pos, delta)) = best else {
                return true;
            };
            self.route.insert(pos, node);
            self.routed[node] = true;
            self.distance += delta;
            self.log_move("insert", node);
        }
    }

    // ── Improvement ──────────────────────────────────────────────────────────

    fn improve(&mut self) {
        loop {
            if self.out_of_time() {
                return;
            }
            let improved = self.relocate()
                || (self.symmetric && self.two_opt())
                || (self.p.allow_dropping && (self.drop_one() || self.reinsert_one()));
            if !improved {
                return;
            }
        }
    }

    /// Move one node to a cheaper position.
    fn relocate(&mut self) -> bool {
        for pos in 1..self.route.len() - 1 {
            let node = self.route[pos];
            let saving = self.removal_saving(pos);
            let mut without = self.route.clone();
            without.remove(pos);
            if let Some((to, delta)) = self.best_position(&without, node) {
                if delta < saving {
                    without.insert(to, node);
                    self.route = without;
                    self.distance += delta - saving;
                    self.log_move("relocate", node);
                    return true;
                }
            }
        }
        false
    }

    /// Reverse one segment of the route.
    fn two_opt(&mut self) -> bool {
        let len = self.route.len();
        for i in 1..len.saturating_sub(2) {
            for j in (i + 1)..(len - 1) {
                let (a, ri, rj, b) = (self.route[i - 1], self.route[i], self.route[j], self.route[j + 1]);
                let gain = self.p.arc(a, ri) + self.p.arc(rj, b) - self.p.arc(a, rj) - self.p.arc(ri, b);
                if gain > 0 {
                    self.route[i..=j].reverse();
                    self.distance -= gain;
                    self.log_move("2-opt", ri);
                    return true;
                }
            }
        }
        false
    }

    /// Drop one node whose detour costs more than its penalty.
    fn drop_one(&mut self) -> bool {
        for pos in 1..self.route.len() - 1 {
            let saving = self.removal_saving(pos);
            if self.weighted(saving) > self.p.drop_penalty {
                let node = self.route.remove(pos);
                self.routed[node] = false;
                self.distance -= saving;
                self.log_move("drop", node);
                return true;
            }
        }
        false
    }

    /// Put one dropped node back if it now fits.
    fn reinsert_one(&mut self) -> bool {
        let found = self
            .p
            .candidate_nodes()
            .filter(|&n| !self.routed[n])
            .find_map(|node| {
                let (pos, delta) = self.best_position(&self.route, node)?;
                self.admits_insertion(delta).then_some((node, pos, delta))
            });
        let Some((node, pos, delta)) = found else {
            return false;
        };
        self.route.insert(pos, node);
        self.routed[node] = true;
        self.distance += delta;
        self.log_move("reinsert", node);
        true
    }
}
