//! The `ScenarioPolicy` strategy value.

use std::time::Duration;

use tracing::warn;

use ods_core::{ScenarioConfig, ScenarioKind, SearchParameters, Trip};
use ods_region::ServiceRegion;

use crate::TripPartition;

/// Distance budget used when a variant must not be limited by distance.
pub const UNBOUNDED_DISTANCE: i64 = 1_000_000_000;

/// Solver time budget for the all-or-nothing variant.
const ALL_BELOW_CUTOFF_TIME_LIMIT_SECS: u64 = 5;

/// Which trips may be routed at all.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Eligibility {
    /// Only trips reserved strictly before this minute.
    ReservedBefore(u32),
    /// Every generated trip.
    Any,
}

impl Eligibility {
    #[inline]
    pub fn admits(self, trip: &Trip) -> bool {
        match self {
            Eligibility::ReservedBefore(cutoff) => trip.reserved_before(cutoff),
            Eligibility::Any => true,
        }
    }
}

/// A scenario variant resolved against a configuration.
///
/// Cheap to copy; built once per run and never changed.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ScenarioPolicy {
    pub kind:           ScenarioKind,
    pub eligibility:    Eligibility,
    /// Upper bound on the route's cumulative distance.
    pub max_distance:   i64,
    /// May the solver leave candidate trips off the route?
    pub allow_dropping: bool,
    /// Wall-clock budget for the solve.
    pub time_limit:     Duration,
}

impl ScenarioPolicy {
    /// Resolve `config.scenario` against the rest of `config`.
    pub fn from_config(config: &ScenarioConfig) -> Self {
        Self::new(config.scenario, config)
    }

    /// Resolve an explicit variant against `config`.
    pub fn new(kind: ScenarioKind, config: &ScenarioConfig) -> Self {
        let cutoff = config.reservation_cutoff_min;
        let time_limit = config.search.time_limit_or(default_time_limit_secs(kind));

        match kind {
            ScenarioKind::Zero => Self {
                kind,
                eligibility:    Eligibility::ReservedBefore(cutoff),
                max_distance:   config.cutoff_distance(),
                allow_dropping: true,
                time_limit,
            },
            ScenarioKind::AllBelowCutoff => Self {
                kind,
                eligibility:    Eligibility::ReservedBefore(cutoff),
                max_distance:   UNBOUNDED_DISTANCE,
                allow_dropping: false,
                time_limit,
            },
            ScenarioKind::One => Self {
                kind,
                eligibility:    Eligibility::Any,
                max_distance:   config.cutoff_distance(),
                allow_dropping: true,
                time_limit,
            },
        }
    }

    /// How many trips to generate for `region`.
    ///
    /// `floor(num_zones * λ * planning_horizon)` for every variant, capped at
    /// the number of non-fixed stops.
    pub fn trips_density(&self, config: &ScenarioConfig, region: &ServiceRegion) -> usize {
        let wanted = config.trips_density();
        let available = region.non_fixed_stops().len();
        if wanted > available {
            warn!(wanted, available, "trip density capped at the number of non-fixed stops");
            available
        } else {
            wanted
        }
    }

    /// `true` if the distance budget is a real constraint.
    #[inline]
    pub fn is_distance_bounded(&self) -> bool {
        self.max_distance < UNBOUNDED_DISTANCE
    }

    /// Split `trips` into routing candidates and outright rejections,
    /// preserving generation order in both halves.
    pub fn partition(&self, trips: &[Trip]) -> TripPartition {
        let (candidates, ineligible) =
            trips.iter().partition::<Vec<&Trip>, _>(|t| self.eligibility.admits(t));
        TripPartition {
            candidates: candidates.into_iter().map(|t| t.id).collect(),
            ineligible: ineligible.into_iter().map(|t| t.id).collect(),
        }
    }
}

fn default_time_limit_secs(kind: ScenarioKind) -> u64 {
    match kind {
        ScenarioKind::AllBelowCutoff => ALL_BELOW_CUTOFF_TIME_LIMIT_SECS,
        ScenarioKind::Zero | ScenarioKind::One => SearchParameters::DEFAULT_TIME_LIMIT_SECS,
    }
}
