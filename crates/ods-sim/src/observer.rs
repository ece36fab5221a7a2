//! Run observer trait for progress reporting and result persistence.

use ods_core::{RunId, Trip};
use ods_routing::RoutingProblem;

use crate::{RunRecord, ScenarioRun};

/// Callbacks invoked by [`ScenarioRun::run`][crate::ScenarioRun::run] at
/// each pipeline boundary.
///
/// All hooks default to no-ops so implementors only override what they
/// care about.  Hooks cannot fail directly; an observer that hits an error
/// keeps it and reports it through [`take_failure`](Self::take_failure),
/// which the run polls after `on_run_start` and after `on_run_end`.
///
/// # Example — accepted-trip counter
///
/// ```rust,ignore
/// struct Accepted(usize);
///
/// impl RunObserver for Accepted {
///     fn on_run_end(&mut self, run: &ScenarioRun) {
///         self.0 += run.accepted().count();
///     }
/// }
/// ```
pub trait RunObserver {
    /// Called before anything is partitioned or solved.
    fn on_run_start(&mut self, _run: &ScenarioRun) {}

    /// Called with the generated trips, all still `PENDING`.
    fn on_trips_generated(&mut self, _run: RunId, _trips: &[Trip]) {}

    /// Called with the formulated problem just before the solver is invoked.
    /// Not called when there are no candidates to route.
    fn on_solve_start(&mut self, _problem: &RoutingProblem) {}

    /// Called once the record is assembled and every trip is final.
    fn on_solve_end(&mut self, _record: &RunRecord) {}

    /// Called last, with the finished run.
    fn on_run_end(&mut self, _run: &ScenarioRun) {}

    /// Hand over the first error the observer hit, if any.
    fn take_failure(&mut self) -> Option<String> {
        None
    }
}

/// A [`RunObserver`] that does nothing.
pub struct NoopObserver;

impl RunObserver for NoopObserver {}

impl<O: RunObserver + ?Sized> RunObserver for &mut O {
    fn on_run_start(&mut self, run: &ScenarioRun) {
        (**self).on_run_start(run)
    }

    fn on_trips_generated(&mut self, run: RunId, trips: &[Trip]) {
        (**self).on_trips_generated(run, trips)
    }

    fn on_solve_start(&mut self, problem: &RoutingProblem) {
        (**self).on_solve_start(problem)
    }

    fn on_solve_end(&mut self, record: &RunRecord) {
        (**self).on_solve_end(record)
    }

    fn on_run_end(&mut self, run: &ScenarioRun) {
        (**self).on_run_end(run)
    }

    fn take_failure(&mut self) -> Option<String> {
        (**self).take_failure()
    }
}
