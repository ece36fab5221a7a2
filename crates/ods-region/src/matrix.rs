//! Dense pairwise distance matrix.
//!
//! # Data layout
//!
//! Distances are stored row-major in a single `Vec<f64>` of length `n²`:
//!
//! ```text
//! d(i, j) = data[i * n + j]
//! ```
//!
//! Regions are small (typically a few hundred stops at most), so the full
//! O(n²) matrix is cheap and gives O(1) lookups during formulation.

use ods_core::{Point, StopIndex};

use crate::{RegionError, RegionResult};

/// Symmetric Euclidean distances between every pair of stops.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DistanceMatrix {
    size: usize,
    data: Vec<f64>,
}

impl DistanceMatrix {
    /// Compute all pairwise distances between `points`.
    ///
    /// Only the upper triangle is computed; the lower triangle is mirrored so
    /// the result is exactly symmetric.
    pub fn from_points(points: &[Point]) -> Self {
        let size = points.len();
        let mut data = vec![0.0; size * size];
        for i in 0..size {
            for j in (i + 1)..size {
                let d = points[i].distance(points[j]);
                data[i * size + j] = d;
                data[j * size + i] = d;
            }
        }
        Self { size, data }
    }

    /// Number of rows (= columns).
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Distance between stops `i` and `j`.
    ///
    /// # Panics
    /// Panics if either index is out of range.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[i * self.size + j]
    }

    /// Row `i` as a slice.
    #[inline]
    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.size..(i + 1) * self.size]
    }

    /// Iterator over all rows.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> + '_ {
        self.data.chunks(self.size.max(1))
    }

    /// Select the rows and columns named by `stops` (in that order) and
    /// truncate every entry towards zero.
    ///
    /// `result[a][b] = trunc(d(stops[a], stops[b]))`.  Repeated indices are
    /// allowed and yield repeated rows/columns.
    pub fn truncated_submatrix(&self, stops: &[StopIndex]) -> RegionResult<Vec<Vec<i64>>> {
        if let Some(&bad) = stops.iter().find(|s| s.index() >= self.size) {
            return Err(RegionError::StopOutOfRange { index: bad, stops: self.size });
        }
        Ok(stops
            .iter()
            .map(|&from| {
                let row = self.row(from.index());
                stops.iter().map(|&to| row[to.index()].trunc() as i64).collect()
            })
            .collect())
    }
}
