//! `ods-sim` — runs on-demand shuttle scenarios end to end.
//!
//! # Pipeline of one run
//!
//! ```text
//! RunBuilder::build
//!   ① Region    — ServiceRegion::build draws the depot from the run's RNG.
//!   ② Demand    — generate() draws trips_density PENDING trips.
//! ScenarioRun::run
//!   ③ Partition — the ScenarioPolicy splits trips; ineligible → REJECTED.
//!   ④ Formulate — candidates become nodes 1..=k of a RoutingProblem.
//!   ⑤ Solve     — RouteSolver::solve (skipped when there are no candidates).
//!   ⑥ Assemble  — candidates → ACCEPTED / REJECTED; a RunRecord is built.
//! ```
//!
//! Solver failures never abort a run: they become [`RunRecord::Failed`] and
//! every candidate is rejected.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | [`Batch`] executes its runs on Rayon's thread pool.    |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use ods_core::ScenarioConfig;
//! use ods_routing::InsertionSolver;
//! use ods_sim::{NoopObserver, RunBuilder};
//!
//! let mut run = RunBuilder::new(ScenarioConfig::default()).seed(7).build()?;
//! run.run(&InsertionSolver, &mut NoopObserver)?;
//! let accepted = run.accepted().count();
//! ```

pub mod assemble;
pub mod batch;
pub mod builder;
pub mod error;
pub mod observer;
pub mod run;


pub use assemble::{FailureRecord, ResultAssembler, RouteStop, RouteSummary, RunRecord};
pub use batch::{Batch, BatchSummary};
pub use builder::RunBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, RunObserver};
pub use run::{RunState, ScenarioRun};
