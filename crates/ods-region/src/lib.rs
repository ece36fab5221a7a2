//! `ods-region` — the spatial model of the service area.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                   |
//! |------------|------------------------------------------------------------|
//! | [`region`] | `ServiceRegion` (grid of stops + depot), `Stop`            |
//! | [`matrix`] | `DistanceMatrix` (dense, symmetric, Euclidean)             |
//! | [`error`]  | `RegionError`, `RegionResult<T>`                           |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.           |

pub mod error;
pub mod matrix;
pub mod region;

#[cfg(test)]
mod tests;

pub use error::{RegionError, RegionResult};
pub use matrix::DistanceMatrix;
pub use region::{ServiceRegion, Stop};
