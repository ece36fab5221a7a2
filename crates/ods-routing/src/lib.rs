//! `ods-routing` — turns routing candidates into a solver-facing problem and
//! interprets what comes back.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                   |
//! |---------------|------------------------------------------------------------|
//! | [`problem`]   | `RoutingProblem`, `formulate`                              |
//! | [`solver`]    | `RouteSolver` trait, `RouteOutcome`, `SolveError`          |
//! | [`insertion`] | `InsertionSolver` — default deterministic backend          |
//! | [`error`]     | `RoutingError`, `RoutingResult<T>`                         |
//!
//! # Node numbering
//!
//! ```text
//! node 0       → depot (the region's fixed stop)
//! node 1..=k   → candidate trips, in the order they were passed in
//! ```
//!
//! Every route returned by a solver starts and ends at node 0.  Nodes that
//! are not on the route are "dropped".
//!
//! # Pluggability
//!
//! The simulation only talks to [`RouteSolver`], so constraint-programming,
//! MIP, or heuristic backends can be swapped without touching the pipeline,
//! and tests can substitute a scripted fake.

pub mod error;
pub mod insertion;
pub mod problem;
pub mod solver;


pub use error::{RoutingError, RoutingResult};
pub use insertion::InsertionSolver;
pub use problem::{formulate, RoutingProblem, DEPOT};
pub use solver::{RouteOutcome, RouteSolver, SolveError};
