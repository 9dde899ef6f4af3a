use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::{InstrumentId, Position};
use crate::values::{Price, Quantity};

/// Point-in-time view of the account: cash, total value and positions
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PortfolioSnapshot {
    /// Cash balance (short sale proceeds included)
    pub cash: Decimal,

    /// Cash plus the market value of all positions
    pub portfolio_value: Decimal,

    /// Positions by instrument
    #[serde(default)]
    pub positions: HashMap<InstrumentId, Position>,
}

impl PortfolioSnapshot {
    /// Create a snapshot with no positions
    pub fn new(cash: Decimal, portfolio_value: Decimal) -> Self {
        Self {
            cash,
            portfolio_value,
            positions: HashMap::new(),
        }
    }

    /// Snapshot valued at last trade prices: cash plus every position
    pub fn marked(cash: Decimal, positions: HashMap<InstrumentId, Position>) -> Self {
        let mut snapshot = Self {
            cash,
            portfolio_value: cash,
            positions,
        };
        snapshot.portfolio_value += snapshot.positions_value();
        snapshot
    }

    /// Add a position (builder style)
    pub fn with_position(
        mut self,
        instrument_id: impl Into<InstrumentId>,
        quantity: Quantity,
        last_price: Price,
        cost_basis: Price,
    ) -> Self {
        self.positions.insert(
            instrument_id.into(),
            Position::new(quantity, last_price, cost_basis),
        );
        self
    }

    /// Held quantity for an instrument (zero if none)
    pub fn quantity_of(&self, instrument_id: &InstrumentId) -> Quantity {
        self.positions
            .get(instrument_id)
            .map(|p| p.quantity)
            .unwrap_or(Decimal::ZERO)
    }

    /// True if any non-flat position is held
    pub fn has_positions(&self) -> bool {
        self.positions.values().any(|p| !p.is_flat())
    }

    /// Sum of signed position values at last trade prices
    pub fn positions_value(&self) -> Decimal {
        self.positions.values().map(Position::market_value).sum()
    }
}
