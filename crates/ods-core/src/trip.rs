//! Trip reservations and their one-shot status machine.
//!
//! ```text
//! PENDING ──finalize──▶ ACCEPTED
//!    │
//!    └─────finalize──▶ REJECTED
//! ```
//!
//! A trip is created `PENDING` by the demand generator and finalized exactly
//! once, after the solve.  Neither terminal state can be left again.

use std::fmt;

use crate::{OdsError, OdsResult, Point, StopIndex, TripId};

/// Whether the rider travels towards the depot or away from it.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Inbound,
    Outbound,
}

impl Direction {
    /// Upper-case label used in `trips.csv`.
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Inbound  => "INBOUND",
            Direction::Outbound => "OUTBOUND",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle of a reservation.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ReservationStatus {
    #[default]
    Pending,
    Accepted,
    Rejected,
}

impl ReservationStatus {
    #[inline]
    pub fn is_final(self) -> bool {
        !matches!(self, ReservationStatus::Pending)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ReservationStatus::Pending  => "PENDING",
            ReservationStatus::Accepted => "ACCEPTED",
            ReservationStatus::Rejected => "REJECTED",
        }
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One ride reservation tied to a non-depot stop.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Trip {
    pub id:             TripId,
    /// Minutes offset within the reservation window.
    pub reserved_at:    u32,
    pub direction:      Direction,
    /// Index into the region's stop sequence; never the depot.
    pub location_index: StopIndex,
    /// Coordinate of `location_index`, copied for convenience.
    pub location:       Point,
    status:             ReservationStatus,
}

impl Trip {
    /// A new `PENDING` trip.
    pub fn new(
        id:             TripId,
        reserved_at:    u32,
        direction:      Direction,
        location_index: StopIndex,
        location:       Point,
    ) -> Self {
        Self {
            id,
            reserved_at,
            direction,
            location_index,
            location,
            status: ReservationStatus::Pending,
        }
    }

    #[inline]
    pub fn status(&self) -> ReservationStatus {
        self.status
    }

    /// `true` if the reservation was made strictly before `cutoff_min`.
    #[inline]
    pub fn reserved_before(&self, cutoff_min: u32) -> bool {
        self.reserved_at < cutoff_min
    }

    /// Move the trip out of `PENDING`.  Fails if the trip is already final or
    /// if `status` is `PENDING` itself.
    pub fn finalize(&mut self, status: ReservationStatus) -> OdsResult<()> {
        if self.status.is_final() {
            return Err(OdsError::AlreadyFinalized { trip: self.id, status: self.status });
        }
        if !status.is_final() {
            return Err(OdsError::PendingIsNotFinal(self.id));
        }
        self.status = status;
        Ok(())
    }
}
