//! Plain data row types written by output backends.

use ods_core::Trip;

/// One line of `trips.csv`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TripRow {
    pub id:             u32,
    pub direction:      &'static str,
    pub location_index: u32,
    pub reserved_at:    u32,
    pub status:         &'static str,
}

impl From<&Trip> for TripRow {
    fn from(trip: &Trip) -> Self {
        Self {
            id:             trip.id.0,
            direction:      trip.direction.as_str(),
            location_index: trip.location_index.0,
            reserved_at:    trip.reserved_at,
            status:         trip.status().as_str(),
        }
    }
}
