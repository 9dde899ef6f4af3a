//! Exposure Manager
//!
//! Tracks long/short exposure at two levels:
//! 1. Realized: positions currently held, valued at their last trade price
//! 2. Pending: orders still resting, valued at the current market price
//!
//! Short sales are treated as cash-collateralised: the proceeds sit in the
//! reported cash balance but are not spendable, so effective cash backs them
//! out together with the collateral (2x the short exposure).

use log::debug;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tiller_core::{OpenOrders, PortfolioSnapshot, Price};
use tiller_ports::PriceSource;

use crate::config::ExposureConfig;
use crate::error::{ExposureError, Result};

/// A (long, short) pair of amounts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LongShort {
    pub long: Decimal,
    pub short: Decimal,
}

impl LongShort {
    pub fn new(long: Decimal, short: Decimal) -> Self {
        Self { long, short }
    }

    pub fn total(&self) -> Decimal {
        self.long + self.short
    }
}

impl From<LongShort> for (Decimal, Decimal) {
    fn from(pair: LongShort) -> Self {
        (pair.long, pair.short)
    }
}

/// Exposure totals from the most recent `update`. All fields are >= 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExposureState {
    /// Sum of quantity * last price over long positions
    pub realized_long: Decimal,
    /// Sum of |quantity| * last price over short positions
    pub realized_short: Decimal,
    /// Capital needed to fill open orders that open or add to a long
    pub pending_long: Decimal,
    /// Capital needed to fill open orders that open or add to a short
    pub pending_short: Decimal,
}

/// Leverage and long/short exposure accounting against fixed targets
#[derive(Debug, Clone)]
pub struct ExposureManager {
    config: ExposureConfig,
    state: ExposureState,
}

impl ExposureManager {
    /// Create a manager with the given targets; all exposure starts at zero
    pub fn new(
        target_leverage: Decimal,
        target_long_exposure_fraction: Decimal,
        target_short_exposure_fraction: Decimal,
    ) -> Self {
        Self::with_config(ExposureConfig::new(
            target_leverage,
            target_long_exposure_fraction,
            target_short_exposure_fraction,
        ))
    }

    /// Create with custom configuration
    pub fn with_config(config: ExposureConfig) -> Self {
        Self {
            config,
            state: ExposureState::default(),
        }
    }

    /// Get the exposure targets
    pub fn config(&self) -> &ExposureConfig {
        &self.config
    }

    /// Get the totals computed by the last `update`
    pub fn state(&self) -> ExposureState {
        self.state
    }

    /// Recompute all exposure from the current portfolio and open orders
    ///
    /// Instruments with open orders but no available price are skipped for
    /// this pass. Previous totals are discarded.
    pub fn update(
        &mut self,
        portfolio: &PortfolioSnapshot,
        open_orders: &OpenOrders,
        prices: &impl PriceSource,
    ) {
        let mut state = ExposureState::default();

        for (instrument_id, orders) in open_orders {
            let Some(price) = prices.price(instrument_id) else {
                debug!(
                    "No price for {}, skipping {} open order(s)",
                    instrument_id,
                    orders.len()
                );
                continue;
            };

            let held = portfolio.quantity_of(instrument_id);
            for order in orders {
                let (long, short) = Self::pending_for(order.remaining(), held, price);
                state.pending_long += long;
                state.pending_short += short;
            }
        }

        for position in portfolio.positions.values() {
            if position.is_short() {
                state.realized_short += position.notional_value();
            } else if position.is_long() {
                state.realized_long += position.notional_value();
            }
        }

        debug!(
            "Exposure updated: realized long={} short={}, pending long={} short={}",
            state.realized_long, state.realized_short, state.pending_long, state.pending_short
        );

        self.state = state;
    }

    /// Pending (long, short) contribution of one order's remaining quantity
    ///
    /// Only orders that open or extend a position count. A sell against a
    /// long (or a buy against a short) just reduces what is already counted
    /// as realized exposure.
    fn pending_for(remaining: Decimal, held: Decimal, price: Price) -> (Decimal, Decimal) {
        if remaining < Decimal::ZERO && held <= Decimal::ZERO {
            (Decimal::ZERO, price * remaining.abs())
        } else if remaining > Decimal::ZERO && held >= Decimal::ZERO {
            (price * remaining, Decimal::ZERO)
        } else {
            (Decimal::ZERO, Decimal::ZERO)
        }
    }

    /// Cash that can actually be spent, net of short collateral and
    /// (optionally) capital reserved by open orders
    fn effective_cash(&self, cash: Decimal, include_pending: bool) -> Decimal {
        let mut effective = cash - self.state.realized_short * Decimal::TWO;
        if include_pending {
            effective -= self.state.pending_short;
            effective -= self.state.pending_long;
        }
        effective
    }

    fn check_portfolio_value(portfolio_value: Decimal) -> Result<()> {
        if portfolio_value.is_zero() {
            return Err(ExposureError::InvalidPortfolioState {
                portfolio_value,
                reason: "portfolio value must be non-zero",
            });
        }
        Ok(())
    }

    /// (portfolio_value - effective cash) / portfolio_value
    pub fn current_leverage(
        &self,
        cash: Decimal,
        portfolio_value: Decimal,
        include_pending: bool,
    ) -> Result<Decimal> {
        Self::check_portfolio_value(portfolio_value)?;
        let effective = self.effective_cash(cash, include_pending);
        Ok((portfolio_value - effective) / portfolio_value)
    }

    /// Long plus short exposure
    pub fn total_exposure(&self, include_pending: bool) -> Decimal {
        self.long_short_exposure(include_pending).total()
    }

    /// Realized (long, short) exposure, optionally with pending orders added
    pub fn long_short_exposure(&self, include_pending: bool) -> LongShort {
        let mut exposure = LongShort::new(self.state.realized_long, self.state.realized_short);
        if include_pending {
            exposure.long += self.state.pending_long;
            exposure.short += self.state.pending_short;
        }
        exposure
    }

    /// Long and short exposure as fractions of deployed (and optionally unused) capital
    ///
    /// Returns (0, 0) when the denominator is not positive.
    pub fn long_short_exposure_fraction(
        &self,
        cash: Decimal,
        portfolio_value: Decimal,
        include_pending: bool,
        include_unused_cash: bool,
    ) -> Result<LongShort> {
        let exposure = self.long_short_exposure(include_pending);
        let mut total = exposure.total();
        if include_unused_cash {
            total += self.available_cash(cash, portfolio_value, include_pending)?;
        }

        if total <= Decimal::ZERO {
            return Ok(LongShort::default());
        }

        Ok(LongShort::new(exposure.long / total, exposure.short / total))
    }

    /// Effective cash plus the extra buying power the target leverage allows
    pub fn available_cash(
        &self,
        cash: Decimal,
        portfolio_value: Decimal,
        include_pending: bool,
    ) -> Result<Decimal> {
        Self::check_portfolio_value(portfolio_value)?;
        let leverage_cash = portfolio_value * (self.config.target_leverage - Decimal::ONE);
        Ok(self.effective_cash(cash, include_pending) + leverage_cash)
    }

    /// Signed capital still to deploy on each side to reach the target split
    ///
    /// Negative values mean that side is over target. Nothing is clamped;
    /// the caller decides whether to trim.
    pub fn available_cash_long_short(
        &self,
        cash: Decimal,
        portfolio_value: Decimal,
        include_pending: bool,
    ) -> Result<LongShort> {
        let available = self.available_cash(cash, portfolio_value, include_pending)?;
        let current = self.long_short_exposure(include_pending);
        let capital = current.total() + available;

        let target_long = capital * self.config.target_long_exposure_fraction;
        let target_short = capital * self.config.target_short_exposure_fraction;

        Ok(LongShort::new(
            target_long - current.long,
            target_short - current.short,
        ))
    }
}
