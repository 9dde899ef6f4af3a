//! Exposure manager errors

use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExposureError {
    #[error("Invalid portfolio state: portfolio_value={portfolio_value}, {reason}")]
    InvalidPortfolioState {
        portfolio_value: Decimal,
        reason: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, ExposureError>;
