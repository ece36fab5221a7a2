//! Scenario configuration.
//!
//! A `ScenarioConfig` is built once (from defaults, code, or a JSON file via
//! the `serde` feature), validated, and then shared read-only by every stage
//! of every run.  Nothing downstream mutates it.
//!
//! # Units
//!
//! | Quantity                  | Unit                          |
//! |---------------------------|-------------------------------|
//! | zone length / width       | distance units                |
//! | reservation times, cutoff | minutes                       |
//! | shuttle speed             | distance units per second     |
//! | solver time limit         | seconds                       |

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::{OdsError, OdsResult};

pub const SECONDS_PER_MINUTE: u32 = 60;

// ── ScenarioKind ──────────────────────────────────────────────────────────────

/// Which reservation-acceptance policy a run uses.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScenarioKind {
    /// Only planned trips (reserved before the cutoff) are routed; the shuttle
    /// may drop some of them.
    #[default]
    Zero,
    /// Every planned trip must be served; no distance budget, no dropping.
    AllBelowCutoff,
    /// Short-notice trips are routed too; dropping allowed.
    One,
}

impl ScenarioKind {
    pub const ALL: [ScenarioKind; 3] =
        [ScenarioKind::Zero, ScenarioKind::AllBelowCutoff, ScenarioKind::One];

    pub fn as_str(self) -> &'static str {
        match self {
            ScenarioKind::Zero           => "Zero",
            ScenarioKind::AllBelowCutoff => "AllBelowCutoff",
            ScenarioKind::One            => "One",
        }
    }
}

impl fmt::Display for ScenarioKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScenarioKind {
    type Err = OdsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ScenarioKind::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                OdsError::Config(format!(
                    "unknown scenario {s:?}: expected one of Zero, AllBelowCutoff, One"
                ))
            })
    }
}

// ── SearchParameters ──────────────────────────────────────────────────────────

/// Knobs handed to the route solver.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SearchParameters {
    /// Wall-clock budget for one solve.  `None` lets the scenario variant pick
    /// its own default.
    pub time_limit_secs:       Option<u64>,
    /// Cost of leaving one reservation off the route.
    pub drop_penalty:          i64,
    /// Weight of the vehicle's span (its total route distance) in the
    /// objective, on top of the plain arc costs.
    pub span_cost_coefficient: i64,
    /// Emit a `debug!` event for every improving search move.
    pub log_search:            bool,
}

impl SearchParameters {
    pub const DEFAULT_TIME_LIMIT_SECS: u64 = 30;

    /// The time limit, falling back to `default_secs` when unset.
    pub fn time_limit_or(&self, default_secs: u64) -> Duration {
        Duration::from_secs(self.time_limit_secs.unwrap_or(default_secs))
    }
}

impl Default for SearchParameters {
    fn default() -> Self {
        Self {
            time_limit_secs:       None,
            drop_penalty:          1_000,
            span_cost_coefficient: 50,
            log_search:            false,
        }
    }
}

// ── ScenarioConfig ────────────────────────────────────────────────────────────

/// Immutable configuration of a scenario batch.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ScenarioConfig {
    pub scenario:               ScenarioKind,

    /// Grid side count; the region has `zones_per_row²` zones (and stops).
    pub zones_per_row:          u32,
    pub zone_length:            f64,
    pub zone_width:             f64,

    /// Demand density λ: reservations per zone per unit time.
    pub lambda:                 f64,
    /// Fraction of the time window used to scale expected demand, in [0, 1].
    pub planning_horizon:       f64,

    /// Trips reserved at or after this minute are "short notice".
    pub reservation_cutoff_min: u32,
    /// Distance units per second.
    pub shuttle_speed:          f64,

    /// Reservation times are drawn from `[min_reservation_time, max_reservation_time)`.
    pub min_reservation_time:   u32,
    pub max_reservation_time:   u32,

    /// Probability that a generated trip is INBOUND.
    pub direction_probability:  f64,

    /// Independent repetitions in a batch.
    pub num_simulations:        usize,
    pub output_dir:             PathBuf,

    /// Base seed for the batch.  `None` draws a fresh seed per run.
    pub seed:                   Option<u64>,

    pub search:                 SearchParameters,

    pub write_distance_matrix:  bool,
    pub write_route_graph:      bool,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            scenario:               ScenarioKind::Zero,
            zones_per_row:          10,
            zone_length:            1.0,
            zone_width:             1.0,
            lambda:                 0.1,
            planning_horizon:       0.7,
            reservation_cutoff_min: 50,
            shuttle_speed:          0.015,
            min_reservation_time:   0,
            max_reservation_time:   60,
            direction_probability:  0.5,
            num_simulations:        1_000,
            output_dir:             PathBuf::from("output"),
            seed:                   None,
            search:                 SearchParameters::default(),
            write_distance_matrix:  false,
            write_route_graph:      true,
        }
    }
}

impl ScenarioConfig {
    /// Check every field for a usable value.  Call once after loading.
    pub fn validate(&self) -> OdsResult<()> {
        fn bad(msg: String) -> OdsResult<()> {
            Err(OdsError::Config(msg))
        }

        if self.zones_per_row == 0 {
            return bad("zones_per_row must be at least 1".into());
        }
        if !(self.zone_length.is_finite() && self.zone_length > 0.0)
            || !(self.zone_width.is_finite() && self.zone_width > 0.0)
        {
            return bad(format!(
                "zone size must be positive, got {} x {}",
                self.zone_length, self.zone_width
            ));
        }
        if !(self.lambda.is_finite() && self.lambda >= 0.0) {
            return bad(format!("lambda must be non-negative, got {}", self.lambda));
        }
        if !(0.0..=1.0).contains(&self.planning_horizon) {
            return bad(format!(
                "planning_horizon must be within [0, 1], got {}",
                self.planning_horizon
            ));
        }
        if !(self.shuttle_speed.is_finite() && self.shuttle_speed > 0.0) {
            return bad(format!("shuttle_speed must be positive, got {}", self.shuttle_speed));
        }
        if self.min_reservation_time >= self.max_reservation_time {
            return bad(format!(
                "reservation window [{}, {}) is empty",
                self.min_reservation_time, self.max_reservation_time
            ));
        }
        if !(0.0..=1.0).contains(&self.direction_probability) {
            return bad(format!(
                "direction_probability must be within [0, 1], got {}",
                self.direction_probability
            ));
        }
        if self.num_simulations == 0 {
            return bad("num_simulations must be at least 1".into());
        }
        if self.search.drop_penalty < 0 || self.search.span_cost_coefficient < 0 {
            return bad("solver penalty and span coefficient must be non-negative".into());
        }
        Ok(())
    }

    /// Total number of zones (and stops) in the region.
    #[inline]
    pub fn num_zones(&self) -> usize {
        let n = self.zones_per_row as usize;
        n * n
    }

    /// Expected demand: `floor(num_zones * λ * planning_horizon)`.
    pub fn trips_density(&self) -> usize {
        (self.num_zones() as f64 * self.lambda * self.planning_horizon).floor() as usize
    }

    /// Distance the shuttle covers between time zero and the cutoff:
    /// `floor(cutoff_min * 60 * speed)`.
    pub fn cutoff_distance(&self) -> i64 {
        let cutoff_secs = self.reservation_cutoff_min as f64 * SECONDS_PER_MINUTE as f64;
        (cutoff_secs * self.shuttle_speed).floor() as i64
    }

    /// Convert a distance into shuttle travel minutes.
    #[inline]
    pub fn distance_to_minutes(&self, distance: f64) -> f64 {
        distance / (self.shuttle_speed * SECONDS_PER_MINUTE as f64)
    }
}
