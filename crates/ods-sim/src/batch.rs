//! Many independent scenario runs under one configuration.
//!
//! Each run gets its own seed, RNG, region, and observer, so runs share no
//! mutable state.  With the `parallel` feature they execute on Rayon's pool.
//! A run that errors is logged and collected; the batch always continues.

use tracing::{error, info};

use ods_core::{RunId, RunRng, ScenarioConfig};
use ods_routing::RouteSolver;

use crate::{RunBuilder, RunObserver, RunRecord, SimError, SimResult};

/// Totals of a finished batch.
#[derive(Debug, Default)]
pub struct BatchSummary {
    pub runs:   usize,
    /// Runs whose solve produced a route.
    pub solved: usize,
    /// Runs whose solve failed (infeasible, no solution, backend error).
    pub failed: usize,
    /// Runs that could not complete at all.
    pub errors: Vec<(RunId, SimError)>,
}

impl BatchSummary {
    #[inline]
    pub fn errored(&self) -> usize {
        self.errors.len()
    }

    fn record(&mut self, run: RunId, result: SimResult<bool>) {
        self.runs += 1;
        match result {
            Ok(true) => self.solved += 1,
            Ok(false) => self.failed += 1,
            Err(e) => self.errors.push((run, e)),
        }
    }
}

/// Driver for `config.num_simulations` runs.
pub struct Batch {
    config: ScenarioConfig,
}

impl Batch {
    pub fn new(config: ScenarioConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScenarioConfig {
        &self.config
    }

    /// Seed for run `run`: derived from the base seed if one is configured,
    /// otherwise `None` (the run draws its own).
    pub fn run_seed(&self, run: RunId) -> Option<u64> {
        self.config.seed.map(|base| RunRng::derive_seed(base, run))
    }

    /// Execute every run.  `make_observer` is called once per run.
    ///
    /// Only an invalid configuration fails the whole batch; everything else
    /// lands in the returned summary.
    pub fn run<S, O, F>(&self, solver: &S, make_observer: F) -> SimResult<BatchSummary>
    where
        S: RouteSolver + ?Sized,
        O: RunObserver,
        F: Fn(RunId) -> O + Sync,
    {
        self.config.validate()?;
        let n = self.config.num_simulations;
        info!(runs = n, scenario = %self.config.scenario, solver = solver.name(), "batch started");

        let mut summary = BatchSummary::default();
        for (run, result) in self.execute(n, solver, &make_observer) {
            if let Err(e) = &result {
                error!(run = run.0, error = %e, "scenario run failed");
            }
            summary.record(run, result);
        }

        info!(
            solved = summary.solved,
            failed = summary.failed,
            errored = summary.errored(),
            "batch finished"
        );
        Ok(summary)
    }

    #[cfg(not(feature = "parallel"))]
    fn execute<S, O, F>(&self, n: usize, solver: &S, make_observer: &F) -> Vec<(RunId, SimResult<bool>)>
    where
        S: RouteSolver + ?Sized,
        O: RunObserver,
        F: Fn(RunId) -> O + Sync,
    {
        (0..n)
            .map(|i| {
                let run = RunId(i as u32);
                (run, self.run_one(run, solver, make_observer))
            })
            .collect()
    }

    #[cfg(feature = "parallel")]
    fn execute<S, O, F>(&self, n: usize, solver: &S, make_observer: &F) -> Vec<(RunId, SimResult<bool>)>
    where
        S: RouteSolver + ?Sized,
        O: RunObserver,
        F: Fn(RunId) -> O + Sync,
    {
        use rayon::prelude::*;

        (0..n)
            .into_par_iter()
            .map(|i| {
                let run = RunId(i as u32);
                (run, self.run_one(run, solver, make_observer))
            })
            .collect()
    }

    /// Build and execute one run; `Ok(true)` if it produced a route.
    fn run_one<S, O, F>(&self, run: RunId, solver: &S, make_observer: &F) -> SimResult<bool>
    where
        S: RouteSolver + ?Sized,
        O: RunObserver,
        F: Fn(RunId) -> O,
    {
        let mut builder = RunBuilder::new(self.config.clone()).run_id(run);
        if let Some(seed) = self.run_seed(run) {
            builder = builder.seed(seed);
        }
        let mut scenario = builder.build()?;
        let mut observer = make_observer(run);
        scenario.run(solver, &mut observer)?;
        Ok(scenario.record().is_some_and(RunRecord::is_solved))
    }
}
