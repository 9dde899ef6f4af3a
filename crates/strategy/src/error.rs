//! Strategy errors

use thiserror::Error;
use tiller_exposure::ExposureError;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StrategyError {
    #[error("Exposure calculation failed: {0}")]
    Exposure(#[from] ExposureError),

    #[error("Invalid strategy config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, StrategyError>;
