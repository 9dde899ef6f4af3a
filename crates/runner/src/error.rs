//! Runner errors

use thiserror::Error;
use tiller_strategy::StrategyError;

/// Errors loading or validating input files
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read '{path}': {error}")]
    Io { path: String, error: String },

    #[error("Failed to parse {what}: {error}")]
    Parse { what: &'static str, error: String },

    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[derive(Error, Debug)]
pub enum RunnerError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Strategy failed: {0}")]
    Strategy(#[from] StrategyError),
}

pub type Result<T> = std::result::Result<T, RunnerError>;
