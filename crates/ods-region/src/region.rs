//! The service region: a regular grid of zones with one stop per zone.
//!
//! # Stop ordering
//!
//! Zone centres are flattened row-major, with rows running along `y`:
//!
//! ```text
//! index = row * zones_per_row + col
//! x     = col * zone_length + zone_length / 2
//! y     = row * zone_width  + zone_width  / 2
//! ```
//!
//! A 2×2 grid of 10×10 zones therefore yields stops
//! `(5,5) (15,5) (5,15) (15,15)`.
//!
//! # Depot
//!
//! One stop is drawn uniformly at random as the depot ("fixed stop") at
//! construction time.  Every other stop is a candidate trip location.

use tracing::debug;

use ods_core::{Point, RunRng, StopIndex};

use crate::{DistanceMatrix, RegionError, RegionResult};

/// One stop as seen from outside the region.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stop {
    pub index:    StopIndex,
    pub position: Point,
    /// `true` for the depot.
    pub fixed:    bool,
}

/// Grid of stops, their distance matrix, and the chosen depot.
///
/// Built once per scenario run and never mutated afterwards.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ServiceRegion {
    pub zones_per_row: u32,
    pub zone_length:   f64,
    pub zone_width:    f64,

    /// Zone centres in row-major order.  Length = `zones_per_row²`.
    stops:             Vec<Point>,
    distances:         DistanceMatrix,
    fixed_stop:        StopIndex,
    /// Every stop except the depot, in ascending index order.
    non_fixed_stops:   Vec<StopIndex>,
}

impl ServiceRegion {
    /// Build the grid and draw the depot from `rng`.
    pub fn build(
        zones_per_row: u32,
        zone_length:   f64,
        zone_width:    f64,
        rng:           &mut RunRng,
    ) -> RegionResult<Self> {
        let stops = grid_points(zones_per_row, zone_length, zone_width)?;
        let fixed = rng.gen_range(0..stops.len());
        Self::assemble(zones_per_row, zone_length, zone_width, stops, StopIndex(fixed as u32))
    }

    /// Build the grid with an explicitly chosen depot.
    pub fn with_fixed_stop(
        zones_per_row: u32,
        zone_length:   f64,
        zone_width:    f64,
        fixed_stop:    StopIndex,
    ) -> RegionResult<Self> {
        let stops = grid_points(zones_per_row, zone_length, zone_width)?;
        if fixed_stop.index() >= stops.len() {
            return Err(RegionError::StopOutOfRange { index: fixed_stop, stops: stops.len() });
        }
        Self::assemble(zones_per_row, zone_length, zone_width, stops, fixed_stop)
    }

    fn assemble(
        zones_per_row: u32,
        zone_length:   f64,
        zone_width:    f64,
        stops:         Vec<Point>,
        fixed_stop:    StopIndex,
    ) -> RegionResult<Self> {
        let distances = DistanceMatrix::from_points(&stops);
        let non_fixed_stops = (0..stops.len() as u32)
            .map(StopIndex)
            .filter(|&s| s != fixed_stop)
            .collect();

        debug!(
            zones_per_row,
            stops = stops.len(),
            fixed_stop = fixed_stop.0,
            "service region built"
        );

        Ok(Self {
            zones_per_row,
            zone_length,
            zone_width,
            stops,
            distances,
            fixed_stop,
            non_fixed_stops,
        })
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    #[inline]
    pub fn num_zones(&self) -> usize {
        self.stops.len()
    }

    // ── Stops ─────────────────────────────────────────────────────────────

    /// All stop coordinates, row-major.
    #[inline]
    pub fn stops_grid(&self) -> &[Point] {
        &self.stops
    }

    /// Coordinate of stop `index`, or `None` if out of range.
    #[inline]
    pub fn position(&self, index: StopIndex) -> Option<Point> {
        self.stops.get(index.index()).copied()
    }

    /// Full view of stop `index`, or `None` if out of range.
    pub fn stop(&self, index: StopIndex) -> Option<Stop> {
        self.position(index).map(|position| Stop {
            index,
            position,
            fixed: index == self.fixed_stop,
        })
    }

    #[inline]
    pub fn fixed_stop(&self) -> StopIndex {
        self.fixed_stop
    }

    #[inline]
    pub fn fixed_stop_position(&self) -> Point {
        self.stops[self.fixed_stop.index()]
    }

    #[inline]
    pub fn non_fixed_stops(&self) -> &[StopIndex] {
        &self.non_fixed_stops
    }

    #[inline]
    pub fn distance_matrix(&self) -> &DistanceMatrix {
        &self.distances
    }

    /// Distance between two stops.
    #[inline]
    pub fn distance(&self, from: StopIndex, to: StopIndex) -> f64 {
        self.distances.get(from.index(), to.index())
    }
}

/// Zone centres along one axis.
fn axis_points(zones_per_row: u32, zone_size: f64) -> impl Iterator<Item = f64> {
    (0..zones_per_row).map(move |i| i as f64 * zone_size + zone_size / 2.0)
}

fn grid_points(zones_per_row: u32, zone_length: f64, zone_width: f64) -> RegionResult<Vec<Point>> {
    if zones_per_row == 0 {
        return Err(RegionError::EmptyGrid);
    }
    let valid = |v: f64| v.is_finite() && v > 0.0;
    if !valid(zone_length) || !valid(zone_width) {
        return Err(RegionError::InvalidZoneSize { length: zone_length, width: zone_width });
    }

    let xs: Vec<f64> = axis_points(zones_per_row, zone_length).collect();
    Ok(axis_points(zones_per_row, zone_width)
        .flat_map(|y| xs.iter().map(move |&x| Point::new(x, y)))
        .collect())
}
