//! Deterministic per-run RNG.
//!
//! # Determinism strategy
//!
//! Each scenario run gets its own independent `SmallRng` seeded by:
//!
//!   seed = base_seed XOR (run_id * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive run IDs uniformly across the seed space.
//! Runs never share RNG state, so a batch can execute them on any number of
//! threads and each run stays reproducible from its own seed.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::RunId;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Per-run deterministic RNG.
///
/// The region's depot draw and the demand draw both consume this generator,
/// in pipeline order.  Not `Sync`; every run owns its own instance.
pub struct RunRng {
    seed: u64,
    rng:  SmallRng,
}

impl RunRng {
    pub fn new(seed: u64) -> Self {
        Self { seed, rng: SmallRng::seed_from_u64(seed) }
    }

    /// Seed deterministically from a batch's base seed and the run's position.
    pub fn for_run(base_seed: u64, run: RunId) -> Self {
        Self::new(Self::derive_seed(base_seed, run))
    }

    /// Seed from OS entropy.  The drawn seed is still recorded so the run can
    /// be replayed.
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// The seed a run at position `run` receives from `base_seed`.
    #[inline]
    pub fn derive_seed(base_seed: u64, run: RunId) -> u64 {
        base_seed ^ (run.0 as u64).wrapping_mul(MIXING_CONSTANT)
    }

    /// The seed this generator was created from.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Expose the inner `SmallRng` for use with `rand` distribution types.
    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.rng
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.rng.gen_range(range)
    }

    /// Uniform `f64` in `[0, 1)`.
    #[inline]
    pub fn unit(&mut self) -> f64 {
        self.rng.r#gen::<f64>()
    }

    /// Draw `amount` distinct indices from `0..length` (without replacement),
    /// in draw order.
    ///
    /// # Panics
    /// Panics if `amount > length`; callers check this first.
    pub fn sample_indices(&mut self, length: usize, amount: usize) -> Vec<usize> {
        rand::seq::index::sample(&mut self.rng, length, amount).into_vec()
    }
}
