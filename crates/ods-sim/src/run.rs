//! The `ScenarioRun` struct and its one-shot pipeline.

use std::time::Instant;

use tracing::{debug, info, warn};

use ods_core::{ReservationStatus, RunId, ScenarioConfig, Trip};
use ods_policy::ScenarioPolicy;
use ods_region::ServiceRegion;
use ods_routing::{formulate, RouteOutcome, RouteSolver};

use crate::{ResultAssembler, RunObserver, RunRecord, SimError, SimResult};

/// Where a run is in its lifecycle.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RunState {
    /// Region and trips exist; every trip is `PENDING`.
    Generated,
    /// Solved (or failed) and every trip is final.  Read-only from here on.
    Finished,
}

/// One independent scenario: configuration, region, trips, and result.
///
/// Create via [`RunBuilder`][crate::RunBuilder].  [`run`](Self::run) may be
/// called exactly once.
pub struct ScenarioRun {
    config: ScenarioConfig,
    run_id: RunId,
    seed:   u64,
    policy: ScenarioPolicy,
    region: ServiceRegion,
    trips:  Vec<Trip>,
    state:  RunState,
    record: Option<RunRecord>,
}

impl ScenarioRun {
    pub(crate) fn new(
        config: ScenarioConfig,
        run_id: RunId,
        seed:   u64,
        policy: ScenarioPolicy,
        region: ServiceRegion,
        trips:  Vec<Trip>,
    ) -> Self {
        Self { config, run_id, seed, policy, region, trips, state: RunState::Generated, record: None }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn config(&self) -> &ScenarioConfig {
        &self.config
    }

    pub fn run_id(&self) -> RunId {
        self.run_id
    }

    /// Seed of the run's RNG; rebuilding with it reproduces region and trips.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn policy(&self) -> &ScenarioPolicy {
        &self.policy
    }

    pub fn region(&self) -> &ServiceRegion {
        &self.region
    }

    /// Trips in generation order.
    pub fn trips(&self) -> &[Trip] {
        &self.trips
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// The run's outcome; `None` until [`run`](Self::run) completes.
    pub fn record(&self) -> Option<&RunRecord> {
        self.record.as_ref()
    }

    /// Trips that ended `ACCEPTED`.
    pub fn accepted(&self) -> impl Iterator<Item = &Trip> {
        self.trips.iter().filter(|t| t.status() == ReservationStatus::Accepted)
    }

    // ── Pipeline ──────────────────────────────────────────────────────────

    /// Partition, formulate, solve, and assemble.
    ///
    /// Solver failures are recorded in [`record`](Self::record), not
    /// returned as errors.  Errors come from formulation, a second call, or
    /// an observer reporting a failure.
    pub fn run<S, O>(&mut self, solver: &S, observer: &mut O) -> SimResult<()>
    where
        S: RouteSolver + ?Sized,
        O: RunObserver + ?Sized,
    {
        if self.state != RunState::Generated {
            return Err(SimError::AlreadyRun);
        }

        observer.on_run_start(self);
        if let Some(e) = observer.take_failure() {
            return Err(SimError::Observer(e));
        }
        observer.on_trips_generated(self.run_id, &self.trips);

        // ── ③ Partition ───────────────────────────────────────────────────
        let partition = self.policy.partition(&self.trips);
        for id in &partition.ineligible {
            self.trips[id.position()].finalize(ReservationStatus::Rejected)?;
        }
        debug!(
            run = self.run_id.0,
            candidates = partition.candidates.len(),
            ineligible = partition.ineligible.len(),
            distance_bounded = self.policy.is_distance_bounded(),
            "trips partitioned"
        );

        // ── ④ Formulate ───────────────────────────────────────────────────
        let candidates = partition.candidates.iter().map(|id| &self.trips[id.position()]);
        let problem = formulate(
            &self.region,
            candidates,
            self.policy.max_distance,
            self.policy.allow_dropping,
        )?
        .with_search(&self.config.search, self.policy.time_limit);

        // ── ⑤ Solve ───────────────────────────────────────────────────────
        let started = Instant::now();
        let result = if partition.has_no_candidates() {
            Ok(RouteOutcome::trivial())
        } else {
            observer.on_solve_start(&problem);
            solver.solve(&problem).and_then(|outcome| {
                outcome.validate(&problem)?;
                Ok(outcome)
            })
        };
        let elapsed = started.elapsed();
        if let Err(e) = &result {
            warn!(run = self.run_id.0, solver = solver.name(), error = %e, "solve failed");
        }

        // ── ⑥ Assemble ────────────────────────────────────────────────────
        let record = ResultAssembler::new(&self.config).assemble(
            &mut self.trips,
            &partition,
            &problem,
            result,
            elapsed,
        )?;
        match &record {
            RunRecord::Solved(s) => info!(
                run = self.run_id.0,
                accepted = s.accepted.len(),
                dropped = s.dropped.len(),
                route_time_min = s.route_time_min,
                "run solved"
            ),
            RunRecord::Failed(f) => info!(run = self.run_id.0, detail = %f.detail(), "run failed"),
        }

        observer.on_solve_end(&record);
        self.record = Some(record);
        self.state = RunState::Finished;

        observer.on_run_end(self);
        if let Some(e) = observer.take_failure() {
            return Err(SimError::Observer(e));
        }
        Ok(())
    }
}
