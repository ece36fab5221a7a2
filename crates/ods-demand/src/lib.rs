//! `ods-demand` — draws the stochastic set of trip reservations for a run.
//!
//! # Crate layout
//!
//! | Module        | Contents                                               |
//! |---------------|--------------------------------------------------------|
//! | [`generator`] | `DemandParams`, `generate`                             |
//! | [`error`]     | `DemandError`, `DemandResult<T>`                       |
//!
//! # Sampling model (summary)
//!
//! ```text
//! stops        = sample `trips_density` distinct non-fixed stops
//! for each stop, in draw order:
//!   reserved_at ~ UniformInt[min_reservation_time, max_reservation_time)
//!   direction   = INBOUND with probability p, else OUTBOUND
//!   id          = 1, 2, 3, …
//! ```

pub mod error;
pub mod generator;

#[cfg(test)]
mod tests;

pub use error::{DemandError, DemandResult};
pub use generator::{generate, DemandParams};
