use thiserror::Error;

#[derive(Debug, Error)]
pub enum DemandError {
    #[error("requested {requested} trips but the region has only {available} non-fixed stops")]
    DensityExceedsStops { requested: usize, available: usize },

    #[error("reservation window [{min}, {max}) is empty")]
    EmptyWindow { min: u32, max: u32 },

    #[error("direction probability {0} is outside [0, 1]")]
    InvalidProbability(f64),
}

pub type DemandResult<T> = Result<T, DemandError>;
