//! `ods-policy` — which reservations a scenario variant even tries to serve.
//!
//! A [`ScenarioPolicy`] is resolved once from the run's configuration and
//! bundles the three things a variant decides:
//!
//! | Variant          | Eligible trips             | Distance budget          | Dropping |
//! |------------------|----------------------------|--------------------------|----------|
//! | `Zero`           | `reserved_at < cutoff`     | `cutoff * 60 * speed`    | yes      |
//! | `AllBelowCutoff` | `reserved_at < cutoff`     | effectively unbounded    | no       |
//! | `One`            | all                        | `cutoff * 60 * speed`    | yes      |
//!
//! [`ScenarioPolicy::partition`] splits generated trips into routing
//! candidates and trips that are rejected outright.

pub mod partition;
pub mod policy;


pub use partition::TripPartition;
pub use policy::{Eligibility, ScenarioPolicy, UNBOUNDED_DISTANCE};
