//! Trip generation.

use tracing::debug;

use ods_core::{Direction, RunRng, ScenarioConfig, Trip, TripId};
use ods_region::ServiceRegion;

use crate::{DemandError, DemandResult};

/// Inputs of one demand draw.
#[derive(Clone, Debug, PartialEq)]
pub struct DemandParams {
    /// Number of trips to draw.  Must not exceed the region's non-fixed stops.
    pub trips_density:         usize,
    pub min_reservation_time:  u32,
    /// Exclusive upper bound.
    pub max_reservation_time:  u32,
    /// Probability that a trip is INBOUND.
    pub direction_probability: f64,
}

impl DemandParams {
    /// Window and direction settings from `config`, with a density chosen by
    /// the caller (normally the scenario policy).
    pub fn from_config(config: &ScenarioConfig, trips_density: usize) -> Self {
        Self {
            trips_density,
            min_reservation_time:  config.min_reservation_time,
            max_reservation_time:  config.max_reservation_time,
            direction_probability: config.direction_probability,
        }
    }

    fn validate(&self, available: usize) -> DemandResult<()> {
        if self.trips_density > available {
            return Err(DemandError::DensityExceedsStops {
                requested: self.trips_density,
                available,
            });
        }
        if self.min_reservation_time >= self.max_reservation_time {
            return Err(DemandError::EmptyWindow {
                min: self.min_reservation_time,
                max: self.max_reservation_time,
            });
        }
        if !(0.0..=1.0).contains(&self.direction_probability) {
            return Err(DemandError::InvalidProbability(self.direction_probability));
        }
        Ok(())
    }
}

/// Draw `params.trips_density` trips over `region`.
///
/// Stops are sampled without replacement from the non-fixed stops, so no two
/// trips share a location and none sits on the depot.  Trip ids run from 1
/// in draw order.  Fails fast, before touching `rng`, if the request cannot
/// be satisfied.
pub fn generate(
    region: &ServiceRegion,
    params: &DemandParams,
    rng:    &mut RunRng,
) -> DemandResult<Vec<Trip>> {
    let candidates = region.non_fixed_stops();
    params.validate(candidates.len())?;

    let picks = rng.sample_indices(candidates.len(), params.trips_density);

    let trips: Vec<Trip> = picks
        .into_iter()
        .enumerate()
        .map(|(n, pick)| {
            let stop = candidates[pick];
            let reserved_at =
                rng.gen_range(params.min_reservation_time..params.max_reservation_time);
            let direction = if rng.unit() < params.direction_probability {
                Direction::Inbound
            } else {
                Direction::Outbound
            };
            let location = region.stops_grid()[stop.index()];
            Trip::new(TripId(n as u32 + 1), reserved_at, direction, stop, location)
        })
        .collect();

    debug!(trips = trips.len(), "demand generated");
    Ok(trips)
}
