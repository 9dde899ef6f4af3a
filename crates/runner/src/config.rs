//! Configuration loading for the session runner
//!
//! Supports JSON configuration files for:
//! - Starting capital
//! - Exposure targets (leverage, long/short split)
//! - Universe screen parameters
//! - Exit bands

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tiller_exposure::ExposureConfig;
use tiller_strategy::{ExitBands, ScreenConfig, StrategyConfig};

use crate::error::ConfigError;

/// Root configuration for a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Session name, used in logs
    #[serde(default = "default_name")]
    pub name: String,

    /// Cash in the account before the first day
    #[serde(default = "default_initial_cash")]
    pub initial_cash: Decimal,

    /// Exposure targets
    #[serde(default = "ExposureConfig::long_only")]
    pub exposure: ExposureConfig,

    /// Universe screen
    #[serde(default)]
    pub screen: ScreenConfig,

    /// Stop-loss / take-profit bands
    #[serde(default)]
    pub bands: ExitBands,
}

fn default_name() -> String {
    "tiller".to_string()
}

fn default_initial_cash() -> Decimal {
    dec!(100000)
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            initial_cash: default_initial_cash(),
            exposure: ExposureConfig::long_only(),
            screen: ScreenConfig::default(),
            bands: ExitBands::default(),
        }
    }
}

impl RunnerConfig {
    /// Load configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
            path: path.as_ref().display().to_string(),
            error: e.to_string(),
        })?;

        Self::from_json(&content)
    }

    /// Parse configuration from JSON string
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(|e| ConfigError::Parse {
            what: "config",
            error: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the session cannot run with
    ///
    /// Exposure fractions are passed through as configured.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.initial_cash <= Decimal::ZERO {
            return Err(ConfigError::Invalid(format!(
                "initial_cash must be positive, got {}",
                self.initial_cash
            )));
        }
        self.screen
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    pub fn strategy_config(&self) -> StrategyConfig {
        StrategyConfig {
            exposure: self.exposure,
            screen: self.screen.clone(),
            bands: self.bands,
        }
    }
}
