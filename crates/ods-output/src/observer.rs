//! `RunOutputObserver<W>` — bridges `RunObserver` to a `RunWriter`.

use ods_core::ScenarioConfig;
use ods_sim::{RunObserver, ScenarioRun};

use crate::writer::RunWriter;
use crate::{OutputError, OutputResult, RouteGraph, TripRow};

/// A [`RunObserver`] that persists a run through any [`RunWriter`].
///
/// Storage is allocated in `on_run_start`; everything is written in
/// `on_run_end`, once every trip is final.  Errors are stored because
/// observer hooks have no return value.  The run polls them through
/// `take_failure`; call [`take_error`][Self::take_error] to get the typed
/// error instead.
pub struct RunOutputObserver<W: RunWriter> {
    writer:                W,
    write_distance_matrix: bool,
    write_route_graph:     bool,
    last_error:            Option<OutputError>,
}

impl<W: RunWriter> RunOutputObserver<W> {
    /// Create an observer backed by `writer`, taking the optional-artifact
    /// switches from `config`.
    pub fn new(writer: W, config: &ScenarioConfig) -> Self {
        Self {
            writer,
            write_distance_matrix: config.write_distance_matrix,
            write_route_graph:     config.write_route_graph,
            last_error:            None,
        }
    }

    /// Take the stored write error (if any).
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }

    fn write_run(&mut self, run: &ScenarioRun) -> OutputResult<()> {
        let rows: Vec<TripRow> = run.trips().iter().map(TripRow::from).collect();
        self.writer.write_trips(&rows)?;

        if let Some(record) = run.record() {
            self.writer.write_results(run.seed(), record)?;
        }
        if self.write_distance_matrix {
            self.writer.write_distance_matrix(run.region().distance_matrix())?;
        }
        if self.write_route_graph {
            if let Some(graph) = RouteGraph::from_run(run) {
                self.writer.write_route_graph(&graph)?;
            }
        }
        self.writer.finish()
    }
}

impl<W: RunWriter> RunObserver for RunOutputObserver<W> {
    fn on_run_start(&mut self, _run: &ScenarioRun) {
        let result = self.writer.begin_run();
        self.store_err(result);
    }

    fn on_run_end(&mut self, run: &ScenarioRun) {
        if self.last_error.is_some() {
            return;
        }
        let result = self.write_run(run);
        self.store_err(result);
    }

    fn take_failure(&mut self) -> Option<String> {
        self.take_error().map(|e| e.to_string())
    }
}
