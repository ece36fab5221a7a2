//! Formulation error type.
//!
//! Solver failures are not errors of this kind; they travel as
//! [`SolveError`][crate::SolveError] values and end up in the run's record.

use thiserror::Error;

use ods_core::TripId;
use ods_region::RegionError;

#[derive(Debug, Error)]
pub enum RoutingError {
    #[error("{0} is located at the depot")]
    TripAtDepot(TripId),

    #[error("distance budget must be non-negative, got {0}")]
    NegativeBudget(i64),

    #[error("region lookup failed: {0}")]
    Region(#[from] RegionError),
}

pub type RoutingResult<T> = Result<T, RoutingError>;
