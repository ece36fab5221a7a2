//! `ods-core` — foundational types for the on-demand shuttle simulator.
//!
//! This crate is a dependency of every other `ods-*` crate.  It has no
//! `ods-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module     | Contents                                                   |
//! |------------|------------------------------------------------------------|
//! | [`ids`]    | `TripId`, `StopIndex`, `RunId`                             |
//! | [`geo`]    | `Point`, Euclidean distance                                |
//! | [`trip`]   | `Trip`, `Direction`, `ReservationStatus`                   |
//! | [`config`] | `ScenarioConfig`, `ScenarioKind`, `SearchParameters`       |
//! | [`rng`]    | `RunRng` (one per scenario run)                            |
//! | [`error`]  | `OdsError`, `OdsResult`                                    |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | `Serialize`/`Deserialize` on all public types; required to |
//! |         | load a `ScenarioConfig` from a JSON file.                  |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod trip;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{ScenarioConfig, ScenarioKind, SearchParameters, SECONDS_PER_MINUTE};
pub use error::{OdsError, OdsResult};
pub use geo::Point;
pub use ids::{RunId, StopIndex, TripId};
pub use rng::RunRng;
pub use trip::{Direction, ReservationStatus, Trip};
