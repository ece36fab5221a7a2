//! Flat-file output backend.
//!
//! Creates one timestamped directory per run under `<output_dir>/data/` and
//! writes `trips.csv`, `results.txt`, and optionally `distance_matrix.out`
//! and `graph.dot` into it.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::Local;
use csv::WriterBuilder;
use tracing::debug;

use ods_region::DistanceMatrix;
use ods_sim::RunRecord;

use crate::writer::RunWriter;
use crate::{OutputError, OutputResult, RouteGraph, RunDirectory, TripRow};

pub const TRIPS_FILE: &str = "trips.csv";
pub const RESULTS_FILE: &str = "results.txt";
pub const MATRIX_FILE: &str = "distance_matrix.out";
pub const GRAPH_FILE: &str = "graph.dot";

const TRIPS_HEADER: [&str; 5] = ["ID", "DIRECTION", "LOCATION_INDEX", "RESERVED_AT", "RESERVATION_STATUS"];

/// Writes each run into its own directory below `output_dir`.
pub struct FileRunWriter {
    output_dir: PathBuf,
    run_dir:    Option<RunDirectory>,
}

impl FileRunWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self { output_dir: output_dir.into(), run_dir: None }
    }

    /// Directory of the current run, once [`begin_run`](RunWriter::begin_run)
    /// has succeeded.
    pub fn run_dir(&self) -> Option<&Path> {
        self.run_dir.as_ref().map(RunDirectory::path)
    }

    fn file(&self, name: &str) -> OutputResult<PathBuf> {
        self.run_dir.as_ref().map(|d| d.file(name)).ok_or(OutputError::NoRunDirectory)
    }
}

impl RunWriter for FileRunWriter {
    fn begin_run(&mut self) -> OutputResult<()> {
        let dir = RunDirectory::create(&self.output_dir, Local::now().naive_local())?;
        debug!(path = %dir.path().display(), "run directory created");
        self.run_dir = Some(dir);
        Ok(())
    }

    /// `ID, DIRECTION, LOCATION_INDEX, RESERVED_AT, RESERVATION_STATUS`, with
    /// a space after every comma.
    fn write_trips(&mut self, rows: &[TripRow]) -> OutputResult<()> {
        let mut w = WriterBuilder::new().has_headers(false).from_path(self.file(TRIPS_FILE)?)?;
        w.write_record(spaced(TRIPS_HEADER.map(String::from)))?;
        for row in rows {
            w.write_record(spaced([
                row.id.to_string(),
                row.direction.to_string(),
                row.location_index.to_string(),
                row.reserved_at.to_string(),
                row.status.to_string(),
            ]))?;
        }
        w.flush()?;
        Ok(())
    }

    fn write_results(&mut self, seed: u64, record: &RunRecord) -> OutputResult<()> {
        let mut f = BufWriter::new(File::create(self.file(RESULTS_FILE)?)?);
        match record {
            RunRecord::Solved(s) => {
                writeln!(f, "Objective: <= {} minutes", s.objective_bound_min)?;
                writeln!(f, "Route for Shuttle:")?;
                let nodes: Vec<String> = s.route.iter().map(|stop| stop.node.to_string()).collect();
                writeln!(f, "{}", nodes.join(" -> "))?;
                writeln!(f, "Route time: {:.2} minutes", s.route_time_min)?;
                writeln!(f)?;
                writeln!(f, "Elapsed time: {} seconds", s.elapsed.as_secs_f64())?;
                writeln!(f, "Objective value: {}", s.objective)?;
                let dropped: Vec<String> = s.dropped.iter().map(|id| id.0.to_string()).collect();
                writeln!(f, "Dropped trips: {}", dropped.join(", "))?;
                let stops: Vec<String> = s.location_indices().map(|i| i.0.to_string()).collect();
                writeln!(f, "Region stops: {}", stops.join(" -> "))?;
            }
            RunRecord::Failed(failure) => {
                writeln!(f, "Failed to find solution")?;
                writeln!(f, "{}", failure.detail())?;
            }
        }
        writeln!(f, "Seed: {seed}")?;
        f.flush()?;
        Ok(())
    }

    /// One row per line, values in `%.18e` notation separated by spaces.
    fn write_distance_matrix(&mut self, matrix: &DistanceMatrix) -> OutputResult<()> {
        let mut f = BufWriter::new(File::create(self.file(MATRIX_FILE)?)?);
        for row in matrix.rows() {
            let line: Vec<String> = row.iter().map(|&v| scientific(v)).collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        f.flush()?;
        Ok(())
    }

    fn write_route_graph(&mut self, graph: &RouteGraph) -> OutputResult<()> {
        fs::write(self.file(GRAPH_FILE)?, graph.to_dot())?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if let Some(dir) = &self.run_dir {
            debug!(path = %dir.path().display(), "run results stored");
        }
        Ok(())
    }
}

/// Prefix every field after the first with a space.
fn spaced(fields: [String; 5]) -> [String; 5] {
    let mut fields = fields;
    for field in fields.iter_mut().skip(1) {
        field.insert(0, ' ');
    }
    fields
}

/// `v` as `d.dddddddddddddddddde±XX`.
pub fn scientific(v: f64) -> String {
    let s = format!("{v:.18e}");
    match s.split_once('e') {
        Some((mantissa, exp)) => match exp.parse::<i32>() {
            Ok(exp) => {
                let sign = if exp < 0 { '-' } else { '+' };
                format!("{mantissa}e{sign}{:02}", exp.abs())
            }
            Err(_) => s,
        },
        None => s,
    }
}
