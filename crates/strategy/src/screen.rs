//! Universe Screen
//!
//! Narrows the tradable universe to a ranked candidate list:
//!
//! 1. **Price**: latest close below `max_price`
//! 2. **Momentum**: fast SMA above slow SMA
//! 3. **Volatility**: rank survivors by annualized volatility, keep the top `top_n`
//!
//! Instruments without enough history for every statistic are left out.

use log::{debug, info};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tiller_core::{InstrumentId, Price};

use crate::error::{Result, StrategyError};
use crate::indicators::{annualized_volatility, sma};

/// Screen parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenConfig {
    /// Only instruments whose latest close is strictly below this pass
    pub max_price: Price,
    /// Fast moving average window (days)
    pub fast_window: usize,
    /// Slow moving average window (days)
    pub slow_window: usize,
    /// Number of closes in the volatility estimate
    pub volatility_window: usize,
    /// How many of the most volatile survivors to keep
    pub top_n: usize,
    /// Annualisation factor for the daily close dispersion
    pub trading_days_per_year: u32,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            max_price: dec!(5),
            fast_window: 20,
            slow_window: 200,
            volatility_window: 30,
            top_n: 1,
            trading_days_per_year: 252,
        }
    }
}

impl ScreenConfig {
    pub fn validate(&self) -> Result<()> {
        if self.fast_window == 0 || self.slow_window == 0 {
            return Err(StrategyError::InvalidConfig(
                "moving average windows must be positive".to_string(),
            ));
        }
        if self.volatility_window < 2 {
            return Err(StrategyError::InvalidConfig(format!(
                "volatility_window must be at least 2, got {}",
                self.volatility_window
            )));
        }
        if self.top_n == 0 {
            return Err(StrategyError::InvalidConfig(
                "top_n must be positive".to_string(),
            ));
        }
        if self.trading_days_per_year == 0 {
            return Err(StrategyError::InvalidConfig(
                "trading_days_per_year must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Closes needed before an instrument can be evaluated
    pub fn required_history(&self) -> usize {
        self.fast_window
            .max(self.slow_window)
            .max(self.volatility_window)
    }
}

/// Daily close history for one instrument, oldest first
#[derive(Debug, Clone, PartialEq)]
pub struct InstrumentHistory {
    pub instrument_id: InstrumentId,
    pub closes: Vec<Price>,
    /// Part of the tradable base universe today
    pub tradable: bool,
}

impl InstrumentHistory {
    pub fn new(instrument_id: impl Into<InstrumentId>, closes: Vec<Price>) -> Self {
        Self {
            instrument_id: instrument_id.into(),
            closes,
            tradable: true,
        }
    }

    pub fn untradable(mut self) -> Self {
        self.tradable = false;
        self
    }
}

/// An instrument that passed every filter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub instrument_id: InstrumentId,
    pub last_close: Price,
    pub sma_fast: Decimal,
    pub sma_slow: Decimal,
    pub volatility: Decimal,
}

/// Price / momentum / volatility screen
#[derive(Debug, Clone)]
pub struct UniverseScreen {
    config: ScreenConfig,
}

impl UniverseScreen {
    pub fn new(config: ScreenConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ScreenConfig {
        &self.config
    }

    /// Evaluate one instrument against the price and momentum filters
    fn evaluate(&self, history: &InstrumentHistory) -> Option<Candidate> {
        if !history.tradable || history.closes.len() < self.config.required_history() {
            return None;
        }

        let last_close = *history.closes.last()?;
        if last_close >= self.config.max_price {
            return None;
        }

        let sma_fast = sma(&history.closes, self.config.fast_window)?;
        let sma_slow = sma(&history.closes, self.config.slow_window)?;
        if sma_fast <= sma_slow {
            return None;
        }

        let volatility = annualized_volatility(
            &history.closes,
            self.config.volatility_window,
            self.config.trading_days_per_year,
        )?;

        Some(Candidate {
            instrument_id: history.instrument_id.clone(),
            last_close,
            sma_fast,
            sma_slow,
            volatility,
        })
    }

    /// Run the screen, most volatile first
    pub fn run(&self, universe: &[InstrumentHistory]) -> Vec<Candidate> {
        let mut survivors: Vec<Candidate> = universe
            .iter()
            .filter_map(|history| {
                let candidate = self.evaluate(history);
                if candidate.is_none() {
                    debug!("Screened out {}", history.instrument_id);
                }
                candidate
            })
            .collect();

        survivors.sort_by(|a, b| {
            b.volatility
                .cmp(&a.volatility)
                .then_with(|| a.instrument_id.cmp(&b.instrument_id))
        });
        survivors.truncate(self.config.top_n);

        info!(
            "Screen selected {} of {} instruments: {:?}",
            survivors.len(),
            universe.len(),
            survivors
                .iter()
                .map(|c| c.instrument_id.as_str())
                .collect::<Vec<_>>()
        );

        survivors
    }
}
