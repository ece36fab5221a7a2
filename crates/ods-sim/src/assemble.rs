//! Maps a solver result back onto trips and builds the run's record.

use std::time::Duration;

use rustc_hash::FxHashSet;

use ods_core::{OdsResult, ReservationStatus, ScenarioConfig, StopIndex, Trip, TripId};
use ods_policy::TripPartition;
use ods_routing::{RouteOutcome, RoutingProblem, SolveError};

// ── Records ──────────────────────────────────────────────────────────────────

/// One stop on the solved route.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RouteStop {
    /// Node index within the routing problem (0 = depot).
    pub node:           usize,
    /// Index into the region's stop sequence.
    pub location_index: StopIndex,
    /// The trip served here; `None` at the depot.
    pub trip:           Option<TripId>,
}

/// Output of a successful solve.
#[derive(Clone, Debug, PartialEq)]
pub struct RouteSummary {
    /// The reservation cutoff in minutes, the bound every variant reports.
    pub objective_bound_min: u32,
    pub objective:           i64,
    /// Starts and ends at the depot.
    pub route:               Vec<RouteStop>,
    /// Integral route length in distance units.
    pub distance:            i64,
    pub route_time_min:      f64,
    pub accepted:            Vec<TripId>,
    pub dropped:             Vec<TripId>,
    pub elapsed:             Duration,
    pub hit_time_limit:      bool,
}

impl RouteSummary {
    /// Region location indices along the route.
    pub fn location_indices(&self) -> impl Iterator<Item = StopIndex> + '_ {
        self.route.iter().map(|s| s.location_index)
    }
}

/// Output of a failed solve.  Every candidate ended `REJECTED`.
#[derive(Clone, Debug, PartialEq)]
pub struct FailureRecord {
    pub error:        SolveError,
    pub candidates:   usize,
    pub max_distance: i64,
    pub elapsed:      Duration,
}

impl FailureRecord {
    /// Human-readable diagnostic for result files and logs.
    pub fn detail(&self) -> String {
        format!(
            "{} ({} candidate trips, max distance {}, after {:.3} s)",
            self.error,
            self.candidates,
            self.max_distance,
            self.elapsed.as_secs_f64()
        )
    }
}

/// Outcome of one scenario run.
#[derive(Clone, Debug, PartialEq)]
pub enum RunRecord {
    Solved(RouteSummary),
    Failed(FailureRecord),
}

impl RunRecord {
    #[inline]
    pub fn is_solved(&self) -> bool {
        matches!(self, RunRecord::Solved(_))
    }

    pub fn summary(&self) -> Option<&RouteSummary> {
        match self {
            RunRecord::Solved(s) => Some(s),
            RunRecord::Failed(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&FailureRecord> {
        match self {
            RunRecord::Solved(_) => None,
            RunRecord::Failed(f) => Some(f),
        }
    }
}

// ── ResultAssembler ──────────────────────────────────────────────────────────

/// Finalizes candidate trips and produces the [`RunRecord`].
pub struct ResultAssembler<'a> {
    config: &'a ScenarioConfig,
}

impl<'a> ResultAssembler<'a> {
    pub fn new(config: &'a ScenarioConfig) -> Self {
        Self { config }
    }

    /// Apply `result` to the candidates of `partition`.
    ///
    /// Candidate at node `i` is `ACCEPTED` iff `i` is not dropped; on failure
    /// every candidate is `REJECTED`.  Ineligible trips are left as they are.
    /// `elapsed` is the wall time of the solve call, used for failures.
    pub fn assemble(
        &self,
        trips:     &mut [Trip],
        partition: &TripPartition,
        problem:   &RoutingProblem,
        result:    Result<RouteOutcome, SolveError>,
        elapsed:   Duration,
    ) -> OdsResult<RunRecord> {
        match result {
            Ok(outcome) => self.solved(trips, partition, problem, outcome).map(RunRecord::Solved),
            Err(error) => {
                for id in &partition.candidates {
                    trips[id.position()].finalize(ReservationStatus::Rejected)?;
                }
                Ok(RunRecord::Failed(FailureRecord {
                    error,
                    candidates: partition.candidates.len(),
                    max_distance: problem.max_distance,
                    elapsed,
                }))
            }
        }
    }

    fn solved(
        &self,
        trips:     &mut [Trip],
        partition: &TripPartition,
        problem:   &RoutingProblem,
        outcome:   RouteOutcome,
    ) -> OdsResult<RouteSummary> {
        let dropped_nodes: FxHashSet<usize> = outcome.dropped.iter().copied().collect();
        let mut accepted = Vec::new();
        let mut dropped = Vec::new();

        for (i, id) in partition.candidates.iter().enumerate() {
            let status = if dropped_nodes.contains(&(i + 1)) {
                dropped.push(*id);
                ReservationStatus::Rejected
            } else {
                accepted.push(*id);
                ReservationStatus::Accepted
            };
            trips[id.position()].finalize(status)?;
        }

        let route = outcome
            .route
            .iter()
            .map(|&node| RouteStop {
                node,
                location_index: problem.locations[node],
                trip: partition.candidate_at_node(node),
            })
            .collect();
        let distance = problem.route_distance(&outcome.route);

        Ok(RouteSummary {
            objective_bound_min: self.config.reservation_cutoff_min,
            objective: outcome.objective,
            route,
            distance,
            route_time_min: self.config.distance_to_minutes(distance as f64),
            accepted,
            dropped,
            elapsed: outcome.elapsed,
            hit_time_limit: outcome.hit_time_limit,
        })
    }
}
