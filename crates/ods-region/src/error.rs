//! Region error type.

use thiserror::Error;

use ods_core::StopIndex;

/// Errors produced by `ods-region`.
#[derive(Debug, Error)]
pub enum RegionError {
    #[error("a service region needs at least one zone per row")]
    EmptyGrid,

    #[error("zone size must be positive and finite, got {length} x {width}")]
    InvalidZoneSize { length: f64, width: f64 },

    #[error("{index} is outside the region ({stops} stops)")]
    StopOutOfRange { index: StopIndex, stops: usize },
}

pub type RegionResult<T> = Result<T, RegionError>;
