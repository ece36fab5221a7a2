//! `ods-output` — persists scenario runs as flat files.
//!
//! Every run gets its own directory under `<output_dir>/data/`, named by a
//! microsecond timestamp, holding:
//!
//! | File                  | Contents                                        |
//! |-----------------------|-------------------------------------------------|
//! | `trips.csv`           | one line per trip, generation order             |
//! | `results.txt`         | route and timing, or the failure detail         |
//! | `distance_matrix.out` | full region matrix (`write_distance_matrix`)    |
//! | `graph.dot`           | Graphviz route diagram (`write_route_graph`)    |
//!
//! [`FileRunWriter`] implements [`RunWriter`] and is driven by
//! [`RunOutputObserver`], which implements `ods_sim::RunObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use ods_output::{FileRunWriter, RunOutputObserver};
//!
//! let writer = FileRunWriter::new(&config.output_dir);
//! let mut obs = RunOutputObserver::new(writer, &config);
//! run.run(&InsertionSolver, &mut obs)?;
//! ```

pub mod dir;
pub mod error;
pub mod files;
pub mod graph;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(test)]
mod tests;

pub use dir::{write_success_marker, RunDirectory};
pub use error::{OutputError, OutputResult};
pub use files::FileRunWriter;
pub use graph::{GraphNode, RouteGraph, StopKind};
pub use observer::RunOutputObserver;
pub use row::TripRow;
pub use writer::RunWriter;
