//! Stop-loss / take-profit bands around cost basis

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tiller_core::{Position, Price};

/// Why a position is being closed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExitReason {
    StopLoss,
    TakeProfit,
}

/// Exit thresholds as multiples of cost basis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExitBands {
    /// Sell once price reaches cost basis * take_profit
    pub take_profit: Decimal,
    /// Sell once price falls to cost basis * stop_loss
    pub stop_loss: Decimal,
}

impl Default for ExitBands {
    fn default() -> Self {
        Self {
            take_profit: dec!(1.10),
            stop_loss: dec!(0.95),
        }
    }
}

impl ExitBands {
    pub fn upper(&self, cost_basis: Price) -> Price {
        cost_basis * self.take_profit
    }

    pub fn lower(&self, cost_basis: Price) -> Price {
        cost_basis * self.stop_loss
    }

    /// Check a position against the bands at the current price
    pub fn check(&self, position: &Position, current_price: Price) -> Option<ExitReason> {
        if position.is_flat() {
            return None;
        }
        if current_price <= self.lower(position.cost_basis) {
            Some(ExitReason::StopLoss)
        } else if current_price >= self.upper(position.cost_basis) {
            Some(ExitReason::TakeProfit)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn held(cost_basis: Decimal) -> Position {
        Position::new(dec!(100), cost_basis, cost_basis)
    }

    #[test]
    fn test_inside_bands() {
        let bands = ExitBands::default();
        assert_eq!(bands.check(&held(dec!(4)), dec!(4.2)), None);
        assert_eq!(bands.check(&held(dec!(4)), dec!(3.81)), None);
    }

    #[test]
    fn test_stop_loss_at_boundary() {
        let bands = ExitBands::default();
        // 4 * 0.95 = 3.80
        assert_eq!(
            bands.check(&held(dec!(4)), dec!(3.80)),
            Some(ExitReason::StopLoss)
        );
        assert_eq!(
            bands.check(&held(dec!(4)), dec!(2)),
            Some(ExitReason::StopLoss)
        );
    }

    #[test]
    fn test_take_profit_at_boundary() {
        let bands = ExitBands::default();
        // 4 * 1.10 = 4.40
        assert_eq!(
            bands.check(&held(dec!(4)), dec!(4.40)),
            Some(ExitReason::TakeProfit)
        );
    }

    #[test]
    fn test_flat_position_never_exits() {
        let bands = ExitBands::default();
        let flat = Position::new(Decimal::ZERO, dec!(4), dec!(4));
        assert_eq!(bands.check(&flat, dec!(1)), None);
    }
}
