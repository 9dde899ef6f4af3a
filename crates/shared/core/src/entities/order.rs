use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::InstrumentId;
use crate::values::Quantity;

/// Open (not fully filled) orders keyed by instrument, in submission order
pub type OpenOrders = HashMap<InstrumentId, Vec<OpenOrder>>;

/// An order resting on the book
///
/// Quantities are signed: positive buys, negative sells. `filled` carries the
/// same sign as `requested`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct OpenOrder {
    pub requested: Quantity,
    pub filled: Quantity,
}

impl OpenOrder {
    /// Create an order with nothing filled yet
    pub fn new(requested: Quantity) -> Self {
        Self {
            requested,
            filled: Decimal::ZERO,
        }
    }

    /// Set the quantity filled so far
    pub fn with_filled(mut self, filled: Quantity) -> Self {
        self.filled = filled;
        self
    }

    /// Returns remaining quantity to be filled (signed)
    pub fn remaining(&self) -> Quantity {
        self.requested - self.filled
    }

    /// Returns true if nothing is left to fill
    pub fn is_filled(&self) -> bool {
        self.remaining().is_zero()
    }
}
