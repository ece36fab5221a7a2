use ods_core::OdsError;
use ods_demand::DemandError;
use ods_region::RegionError;
use ods_routing::RoutingError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("scenario run has already been executed")]
    AlreadyRun,

    #[error(transparent)]
    Core(#[from] OdsError),

    #[error("region construction failed: {0}")]
    Region(#[from] RegionError),

    #[error("demand generation failed: {0}")]
    Demand(#[from] DemandError),

    #[error("route formulation failed: {0}")]
    Routing(#[from] RoutingError),

    #[error("run observer failed: {0}")]
    Observer(String),
}

pub type SimResult<T> = Result<T, SimError>;
