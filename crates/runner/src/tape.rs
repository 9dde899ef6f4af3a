//! Market tape - one closing price per instrument per trading day

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tiller_core::{InstrumentId, Price};
use tiller_ports::PriceSource;

use crate::error::ConfigError;

/// Prices and trading halts for one day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradingDay {
    pub date: NaiveDate,
    /// Closing price per instrument; missing means no data that day
    #[serde(default)]
    pub prices: HashMap<InstrumentId, Price>,
    /// Instruments that have a price but cannot be traded
    #[serde(default)]
    pub halted: Vec<InstrumentId>,
}

impl TradingDay {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            prices: HashMap::new(),
            halted: Vec::new(),
        }
    }

    pub fn with_price(mut self, instrument_id: impl Into<InstrumentId>, price: Price) -> Self {
        self.prices.insert(instrument_id.into(), price);
        self
    }

    pub fn with_halt(mut self, instrument_id: impl Into<InstrumentId>) -> Self {
        self.halted.push(instrument_id.into());
        self
    }
}

impl PriceSource for TradingDay {
    fn price(&self, instrument_id: &InstrumentId) -> Option<Price> {
        self.prices.get(instrument_id).copied()
    }

    fn can_trade(&self, instrument_id: &InstrumentId) -> bool {
        self.prices.contains_key(instrument_id) && !self.halted.contains(instrument_id)
    }
}

/// Ordered sequence of trading days
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketTape {
    pub days: Vec<TradingDay>,
}

impl MarketTape {
    /// Load a tape from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
            path: path.as_ref().display().to_string(),
            error: e.to_string(),
        })?;

        Self::from_json(&content)
    }

    /// Parse a tape from JSON; days must be in strictly increasing date order
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tape: Self = serde_json::from_str(json).map_err(|e| ConfigError::Parse {
            what: "market tape",
            error: e.to_string(),
        })?;

        if let Some(pair) = tape.days.windows(2).find(|pair| pair[0].date >= pair[1].date) {
            return Err(ConfigError::Invalid(format!(
                "market tape out of order: {} then {}",
                pair[0].date, pair[1].date
            )));
        }

        Ok(tape)
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}
