//! Paper Broker
//!
//! Stand-in for the hosting platform's order handling:
//! - Turns strategy actions into whole-unit orders
//! - Rests orders until the next price is known, then fills them completely
//! - Tracks cash, positions and cost basis
//!
//! Orders on instruments without a price, or halted, stay open until they
//! can trade again.

use log::{debug, info, warn};
use rust_decimal::Decimal;
use rust_decimal::prelude::Signed;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tiller_core::{InstrumentId, OpenOrder, OpenOrders, PortfolioSnapshot, Position, Price, Quantity};
use tiller_ports::PriceSource;
use tiller_strategy::Action;

/// A completed execution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fill {
    pub instrument_id: InstrumentId,
    /// Signed quantity (positive = bought)
    pub quantity: Quantity,
    pub price: Price,
}

/// In-memory account that fills resting orders at the next available price
#[derive(Debug, Clone, Default)]
pub struct PaperBroker {
    cash: Decimal,
    positions: HashMap<InstrumentId, Position>,
    open_orders: OpenOrders,
    orders_submitted: u64,
    fills: u64,
}

impl PaperBroker {
    pub fn new(initial_cash: Decimal) -> Self {
        Self {
            cash: initial_cash,
            ..Default::default()
        }
    }

    pub fn cash(&self) -> Decimal {
        self.cash
    }

    pub fn positions(&self) -> &HashMap<InstrumentId, Position> {
        &self.positions
    }

    pub fn open_orders(&self) -> &OpenOrders {
        &self.open_orders
    }

    pub fn orders_submitted(&self) -> u64 {
        self.orders_submitted
    }

    pub fn fills(&self) -> u64 {
        self.fills
    }

    fn held(&self, instrument_id: &InstrumentId) -> Quantity {
        self.positions
            .get(instrument_id)
            .map(|p| p.quantity)
            .unwrap_or(Decimal::ZERO)
    }

    /// Cash plus positions at their last price
    pub fn portfolio_value(&self) -> Decimal {
        self.snapshot().portfolio_value
    }

    /// Current account state as the strategy sees it
    pub fn snapshot(&self) -> PortfolioSnapshot {
        PortfolioSnapshot::marked(self.cash, self.positions.clone())
    }

    /// Turn an action into a resting order
    ///
    /// Returns the order placed, or `None` when the action sizes to nothing.
    pub fn submit(&mut self, action: &Action, prices: &impl PriceSource) -> Option<OpenOrder> {
        let instrument_id = action.instrument_id();
        if !prices.can_trade(instrument_id) {
            warn!("Cannot trade {}, dropping {:?}", instrument_id, action);
            return None;
        }

        let quantity = match action {
            Action::BuyValue { value, .. } => {
                let price = prices.price(instrument_id)?;
                if price <= Decimal::ZERO {
                    return None;
                }
                (*value / price).floor()
            }
            Action::Close { .. } => -self.held(instrument_id),
        };

        if quantity.is_zero() {
            debug!("{:?} sizes to zero units, skipped", action);
            return None;
        }

        let order = OpenOrder::new(quantity);
        self.open_orders
            .entry(instrument_id.clone())
            .or_default()
            .push(order);
        self.orders_submitted += 1;
        info!("Order placed: {} qty={}", instrument_id, quantity);

        Some(order)
    }

    /// Fill every resting order whose instrument is tradable at a known price
    pub fn fill_open_orders(&mut self, prices: &impl PriceSource) -> Vec<Fill> {
        let mut instruments: Vec<InstrumentId> = self.open_orders.keys().cloned().collect();
        instruments.sort();

        let mut fills = Vec::new();
        for instrument_id in instruments {
            if !prices.can_trade(&instrument_id) {
                continue;
            }
            let Some(price) = prices.price(&instrument_id) else {
                continue;
            };
            let Some(orders) = self.open_orders.remove(&instrument_id) else {
                continue;
            };
            for order in orders {
                if order.is_filled() {
                    continue;
                }
                let quantity = order.remaining();
                self.apply_fill(&instrument_id, quantity, price);
                fills.push(Fill {
                    instrument_id: instrument_id.clone(),
                    quantity,
                    price,
                });
            }
        }

        self.fills += fills.len() as u64;
        fills
    }

    /// Update last prices for held positions
    pub fn mark(&mut self, prices: &impl PriceSource) {
        for (instrument_id, position) in self.positions.iter_mut() {
            if let Some(price) = prices.price(instrument_id) {
                position.last_price = price;
            }
        }
    }

    fn apply_fill(&mut self, instrument_id: &InstrumentId, quantity: Quantity, price: Price) {
        self.cash -= quantity * price;

        let position = self.positions.entry(instrument_id.clone()).or_default();
        let new_quantity = position.quantity + quantity;

        if new_quantity.is_zero() {
            // Flat, drop the position
            self.positions.remove(instrument_id);
            info!("Filled {} {} @ {} (closed)", instrument_id, quantity, price);
            return;
        }

        if (position.quantity >= Decimal::ZERO && quantity > Decimal::ZERO)
            || (position.quantity <= Decimal::ZERO && quantity < Decimal::ZERO)
        {
            // Adding to position - weighted average
            let total_cost = position.quantity.abs() * position.cost_basis + quantity.abs() * price;
            position.cost_basis = total_cost / new_quantity.abs();
        } else if new_quantity.signum() != position.quantity.signum() {
            // Flipped sides - new basis is fill price
            position.cost_basis = price;
        }
        // If reducing but not flipping, basis stays same

        position.quantity = new_quantity;
        position.last_price = price;
        info!(
            "Filled {} {} @ {} (position={}, basis={})",
            instrument_id, quantity, price, position.quantity, position.cost_basis
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use tiller_strategy::ExitReason;

    fn price_map(entries: &[(&str, Decimal)]) -> HashMap<InstrumentId, Price> {
        entries
            .iter()
            .map(|(id, price)| (InstrumentId::from(*id), *price))
            .collect()
    }

    fn buy(id: &str, value: Decimal) -> Action {
        Action::BuyValue {
            instrument_id: InstrumentId::from(id),
            value,
        }
    }

    #[test]
    fn test_buy_rounds_down_to_whole_units() {
        let mut broker = PaperBroker::new(dec!(1000));
        let order = broker
            .submit(&buy("ABC", dec!(1000)), &price_map(&[("ABC", dec!(3))]))
            .unwrap();

        assert_eq!(order.requested, dec!(333));
        assert_eq!(broker.orders_submitted(), 1);
        // Nothing moves until the fill
        assert_eq!(broker.cash(), dec!(1000));
    }

    #[test]
    fn test_fill_at_next_price() {
        let mut broker = PaperBroker::new(dec!(1000));
        broker.submit(&buy("ABC", dec!(1000)), &price_map(&[("ABC", dec!(4))]));

        let fills = broker.fill_open_orders(&price_map(&[("ABC", dec!(4.5))]));
        assert_eq!(fills.len(), 1);
        assert_eq!(fills[0].quantity, dec!(250));

        assert_eq!(broker.cash(), dec!(1000) - dec!(1125));
        let position = broker.positions()[&InstrumentId::from("ABC")];
        assert_eq!(position.quantity, dec!(250));
        assert_eq!(position.cost_basis, dec!(4.5));
        assert!(broker.open_orders().is_empty());
    }

    #[test]
    fn test_orders_without_price_stay_open() {
        let mut broker = PaperBroker::new(dec!(1000));
        broker.submit(&buy("ABC", dec!(100)), &price_map(&[("ABC", dec!(1))]));

        assert!(broker.fill_open_orders(&price_map(&[])).is_empty());
        assert_eq!(broker.open_orders()[&InstrumentId::from("ABC")].len(), 1);
    }

    #[test]
    fn test_close_sells_whole_position() {
        let mut broker = PaperBroker::new(dec!(1000));
        let prices = price_map(&[("ABC", dec!(2))]);
        broker.submit(&buy("ABC", dec!(1000)), &prices);
        broker.fill_open_orders(&prices);

        let close = Action::Close {
            instrument_id: InstrumentId::from("ABC"),
            reason: ExitReason::TakeProfit,
        };
        let order = broker.submit(&close, &prices).unwrap();
        assert_eq!(order.requested, dec!(-500));

        broker.fill_open_orders(&price_map(&[("ABC", dec!(2.5))]));
        assert!(broker.positions().is_empty());
        assert_eq!(broker.cash(), dec!(1250));
        assert_eq!(broker.fills(), 2);
    }

    #[test]
    fn test_weighted_cost_basis_on_add() {
        let mut broker = PaperBroker::new(dec!(10000));
        broker.submit(&buy("ABC", dec!(100)), &price_map(&[("ABC", dec!(1))]));
        broker.fill_open_orders(&price_map(&[("ABC", dec!(1))]));
        broker.submit(&buy("ABC", dec!(300)), &price_map(&[("ABC", dec!(3))]));
        broker.fill_open_orders(&price_map(&[("ABC", dec!(3))]));

        let position = broker.positions()[&InstrumentId::from("ABC")];
        assert_eq!(position.quantity, dec!(200));
        assert_eq!(position.cost_basis, dec!(2));
    }

    #[test]
    fn test_snapshot_marks_to_market() {
        let mut broker = PaperBroker::new(dec!(1000));
        let prices = price_map(&[("ABC", dec!(2))]);
        broker.submit(&buy("ABC", dec!(1000)), &prices);
        broker.fill_open_orders(&prices);
        broker.mark(&price_map(&[("ABC", dec!(3))]));

        let snapshot = broker.snapshot();
        assert_eq!(snapshot.cash, Decimal::ZERO);
        assert_eq!(snapshot.portfolio_value, dec!(1500));
        assert_eq!(snapshot.quantity_of(&InstrumentId::from("ABC")), dec!(500));
    }

    #[test]
    fn test_untradable_action_dropped() {
        let mut broker = PaperBroker::new(dec!(1000));
        assert!(broker.submit(&buy("ABC", dec!(1000)), &price_map(&[])).is_none());
        assert_eq!(broker.orders_submitted(), 0);
    }

    #[test]
    fn test_close_without_position_is_noop() {
        let mut broker = PaperBroker::new(dec!(1000));
        let close = Action::Close {
            instrument_id: InstrumentId::from("ABC"),
            reason: ExitReason::StopLoss,
        };
        assert!(broker.submit(&close, &price_map(&[("ABC", dec!(1))])).is_none());
    }
}
