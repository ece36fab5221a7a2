//! The `RunWriter` trait implemented by output backends.

use ods_region::DistanceMatrix;
use ods_sim::RunRecord;

use crate::{OutputResult, RouteGraph, TripRow};

/// Sink for one run's artifacts.
///
/// Errors are stored by the driving observer and retrieved with
/// [`RunOutputObserver::take_error`][crate::RunOutputObserver::take_error].
pub trait RunWriter {
    /// Allocate storage for a new run.  Called before any other write.
    fn begin_run(&mut self) -> OutputResult<()>;

    fn write_trips(&mut self, rows: &[TripRow]) -> OutputResult<()>;

    /// Write the run's record; `seed` reproduces the run.
    fn write_results(&mut self, seed: u64, record: &RunRecord) -> OutputResult<()>;

    fn write_distance_matrix(&mut self, matrix: &DistanceMatrix) -> OutputResult<()>;

    fn write_route_graph(&mut self, graph: &RouteGraph) -> OutputResult<()>;

    /// Flush and close everything.  Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}
