//! Fluent builder for constructing a [`ScenarioRun`].

use tracing::{debug, info};

use ods_core::{RunId, RunRng, ScenarioConfig};
use ods_demand::{generate, DemandParams};
use ods_policy::ScenarioPolicy;
use ods_region::ServiceRegion;

use crate::{ScenarioRun, SimResult};

/// Fluent builder for [`ScenarioRun`].
///
/// # Required inputs
///
/// - [`ScenarioConfig`] — grid, demand, policy, and solver settings.
///
/// # Optional inputs (have defaults)
///
/// | Method        | Default                                            |
/// |---------------|----------------------------------------------------|
/// | `.run_id(id)` | `RunId(0)`                                         |
/// | `.seed(s)`    | Fresh OS-entropy seed (recorded on the run)        |
/// | `.region(r)`  | Built from the config; depot drawn from the RNG    |
///
/// # Example
///
/// ```rust,ignore
/// let mut run = RunBuilder::new(config)
///     .run_id(RunId(3))
///     .seed(42)
///     .build()?;
/// run.run(&InsertionSolver, &mut NoopObserver)?;
/// ```
pub struct RunBuilder {
    config: ScenarioConfig,
    run_id: RunId,
    seed:   Option<u64>,
    region: Option<ServiceRegion>,
}

impl RunBuilder {
    pub fn new(config: ScenarioConfig) -> Self {
        Self { config, run_id: RunId(0), seed: None, region: None }
    }

    /// Position of the run within its batch.
    pub fn run_id(mut self, run_id: RunId) -> Self {
        self.run_id = run_id;
        self
    }

    /// Seed for the run's RNG.  Same seed, same region, same trips.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Use a prebuilt region instead of drawing one.
    ///
    /// The region's grid should match the config; only demand is drawn from
    /// the RNG in that case.
    pub fn region(mut self, region: ServiceRegion) -> Self {
        self.region = Some(region);
        self
    }

    /// Validate the config, build the region, and generate the trips.
    pub fn build(self) -> SimResult<ScenarioRun> {
        self.config.validate()?;

        let mut rng = match self.seed {
            Some(seed) => RunRng::new(seed),
            None => RunRng::from_entropy(),
        };
        let seed = rng.seed();

        // ── ① Region ──────────────────────────────────────────────────────
        let region = match self.region {
            Some(region) => region,
            None => ServiceRegion::build(
                self.config.zones_per_row,
                self.config.zone_length,
                self.config.zone_width,
                &mut rng,
            )?,
        };

        // ── ② Demand ──────────────────────────────────────────────────────
        let policy = ScenarioPolicy::from_config(&self.config);
        let density = policy.trips_density(&self.config, &region);
        let trips = generate(&region, &DemandParams::from_config(&self.config, density), &mut rng)?;

        debug!(
            run = self.run_id.0,
            depot = region.fixed_stop().0,
            trips = trips.len(),
            "scenario generated"
        );
        info!(run = self.run_id.0, seed, scenario = %policy.kind, "scenario run ready");

        Ok(ScenarioRun::new(self.config, self.run_id, seed, policy, region, trips))
    }
}
