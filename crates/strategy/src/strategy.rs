//! Band Strategy
//!
//! Long-only daily strategy:
//! - Before the open, screens the universe for candidates
//! - Shortly after the open, spends the available buying power on the
//!   candidates, but only while the book is empty
//! - On every tick, closes any position that crossed its stop-loss or
//!   take-profit band, unless orders are still in flight

use log::{debug, info};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tiller_core::{InstrumentId, OpenOrders, PortfolioSnapshot};
use tiller_exposure::{ExposureConfig, ExposureManager};
use tiller_ports::PriceSource;

use crate::bands::{ExitBands, ExitReason};
use crate::error::Result;
use crate::screen::{Candidate, InstrumentHistory, ScreenConfig, UniverseScreen};

/// Actions the strategy can request
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Buy as many whole units as `value` covers at the current price
    BuyValue {
        instrument_id: InstrumentId,
        value: Decimal,
    },
    /// Sell (or cover) the entire position
    Close {
        instrument_id: InstrumentId,
        reason: ExitReason,
    },
}

impl Action {
    pub fn instrument_id(&self) -> &InstrumentId {
        match self {
            Action::BuyValue { instrument_id, .. } => instrument_id,
            Action::Close { instrument_id, .. } => instrument_id,
        }
    }
}

/// Context provided to the strategy on each call
pub struct StrategyContext<'a> {
    /// Current account state
    pub portfolio: &'a PortfolioSnapshot,
    /// Orders not yet fully filled
    pub open_orders: &'a OpenOrders,
    /// Current prices and tradability
    pub prices: &'a dyn PriceSource,
}

impl StrategyContext<'_> {
    pub fn has_open_orders(&self) -> bool {
        self.open_orders.values().any(|orders| !orders.is_empty())
    }
}

/// Strategy configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategyConfig {
    pub exposure: ExposureConfig,
    pub screen: ScreenConfig,
    pub bands: ExitBands,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            exposure: ExposureConfig::long_only(),
            screen: ScreenConfig::default(),
            bands: ExitBands::default(),
        }
    }
}

/// Screen-driven buyer with fixed exit bands
pub struct BandStrategy {
    bands: ExitBands,
    screen: UniverseScreen,
    exposure: ExposureManager,
    /// Output of the latest screen
    candidates: Vec<Candidate>,
}

impl BandStrategy {
    pub fn new(config: StrategyConfig) -> Result<Self> {
        Ok(Self {
            bands: config.bands,
            screen: UniverseScreen::new(config.screen)?,
            exposure: ExposureManager::with_config(config.exposure),
            candidates: Vec::new(),
        })
    }

    pub fn name(&self) -> &str {
        "BandStrategy"
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn exposure(&self) -> &ExposureManager {
        &self.exposure
    }

    /// Closes per instrument the screen needs to see
    pub fn required_history(&self) -> usize {
        self.screen.config().required_history()
    }

    fn refresh_exposure(&mut self, ctx: &StrategyContext<'_>) {
        self.exposure
            .update(ctx.portfolio, ctx.open_orders, &ctx.prices);
    }

    /// Screen the universe and keep the result for today's purchase
    pub fn before_trading_start(&mut self, universe: &[InstrumentHistory]) -> &[Candidate] {
        self.candidates = self.screen.run(universe);
        &self.candidates
    }

    /// Spend available buying power on today's candidates
    ///
    /// Nothing is bought while any position is held or any order is still
    /// resting. Budget excludes pending orders and is split evenly across
    /// tradable candidates.
    pub fn purchase_daily(&mut self, ctx: &StrategyContext<'_>) -> Result<Vec<Action>> {
        self.refresh_exposure(ctx);

        if ctx.has_open_orders() {
            debug!("[{}] Open orders in flight, no purchases", self.name());
            return Ok(Vec::new());
        }

        if ctx.portfolio.has_positions() {
            debug!("[{}] Portfolio filled, no purchases", self.name());
            return Ok(Vec::new());
        }

        let budget = self.exposure.available_cash(
            ctx.portfolio.cash,
            ctx.portfolio.portfolio_value,
            false,
        )?;
        if budget <= Decimal::ZERO {
            debug!("[{}] No buying power ({})", self.name(), budget);
            return Ok(Vec::new());
        }

        let tradable: Vec<&Candidate> = self
            .candidates
            .iter()
            .filter(|c| ctx.prices.can_trade(&c.instrument_id))
            .collect();
        if tradable.is_empty() {
            return Ok(Vec::new());
        }

        let value = budget / Decimal::from(tradable.len());
        let actions = tradable
            .into_iter()
            .map(|candidate| {
                info!(
                    "[{}] BUY {} for {} (close={}, vol={:.4})",
                    self.name(),
                    candidate.instrument_id,
                    value,
                    candidate.last_close,
                    candidate.volatility
                );
                Action::BuyValue {
                    instrument_id: candidate.instrument_id.clone(),
                    value,
                }
            })
            .collect();

        Ok(actions)
    }

    /// Check every held position against its exit bands
    pub fn handle_data(&mut self, ctx: &StrategyContext<'_>) -> Result<Vec<Action>> {
        self.refresh_exposure(ctx);

        if ctx.has_open_orders() {
            debug!("[{}] Open orders in flight, skipping exits", self.name());
            return Ok(Vec::new());
        }

        let mut held: Vec<_> = ctx
            .portfolio
            .positions
            .iter()
            .filter(|(_, position)| !position.is_flat())
            .collect();
        held.sort_by(|a, b| a.0.cmp(b.0));

        let mut actions = Vec::new();
        for (instrument_id, position) in held {
            let Some(price) = ctx.prices.price(instrument_id) else {
                continue;
            };
            if !ctx.prices.can_trade(instrument_id) {
                continue;
            }
            if let Some(reason) = self.bands.check(position, price) {
                info!(
                    "[{}] EXIT {} ({:?}): price={}, cost_basis={}, pnl={}",
                    self.name(),
                    instrument_id,
                    reason,
                    price,
                    position.cost_basis,
                    position.unrealized_pnl(price)
                );
                actions.push(Action::Close {
                    instrument_id: instrument_id.clone(),
                    reason,
                });
            }
        }

        Ok(actions)
    }
}
