use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::values::{Price, Quantity};

/// A held position in one instrument, as reported by the platform
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    /// Net quantity (positive = long, negative = short)
    pub quantity: Quantity,

    /// Price of the most recent trade in the instrument
    pub last_price: Price,

    /// Average price paid per unit
    pub cost_basis: Price,
}

impl Position {
    pub fn new(quantity: Quantity, last_price: Price, cost_basis: Price) -> Self {
        Self {
            quantity,
            last_price,
            cost_basis,
        }
    }

    pub fn is_long(&self) -> bool {
        self.quantity > Decimal::ZERO
    }

    pub fn is_short(&self) -> bool {
        self.quantity < Decimal::ZERO
    }

    pub fn is_flat(&self) -> bool {
        self.quantity.is_zero()
    }

    /// Absolute value of the position at its last trade price
    pub fn notional_value(&self) -> Decimal {
        self.quantity.abs() * self.last_price
    }

    /// Signed value of the position at its last trade price
    pub fn market_value(&self) -> Decimal {
        self.quantity * self.last_price
    }

    /// Calculate unrealized PnL given current price
    pub fn unrealized_pnl(&self, current_price: Price) -> Decimal {
        self.quantity * (current_price - self.cost_basis)
    }
}
