//! Base error type.
//!
//! Sub-crates define their own error enums and wrap `OdsError` as one
//! variant via `#[from]`.

use thiserror::Error;

use crate::{ReservationStatus, TripId};

/// The top-level error type for `ods-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum OdsError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("{trip} already finalized as {status}")]
    AlreadyFinalized {
        trip:   TripId,
        status: ReservationStatus,
    },

    #[error("{0} cannot finalize a trip back to PENDING")]
    PendingIsNotFinal(TripId),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for all `ods-*` crates.
pub type OdsResult<T> = Result<T, OdsError>;
