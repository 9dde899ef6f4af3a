//! Trading Session - daily orchestration
//!
//! Each day on the tape runs the same schedule:
//! 1. Yesterday's resting orders fill at today's price
//! 2. Positions are marked to today's prices
//! 3. The universe is screened on close history up to today
//! 4. Exit bands are checked (`handle_data`)
//! 5. Buying power is spent on candidates (`purchase_daily`)
//!
//! Orders placed on day N fill on the next day with a price.

use log::info;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tiller_core::{InstrumentId, Position, Price};
use tiller_ports::PriceSource;
use tiller_strategy::{Action, BandStrategy, InstrumentHistory, StrategyContext};

use crate::broker::{Fill, PaperBroker};
use crate::config::RunnerConfig;
use crate::error::Result;
use crate::tape::{MarketTape, TradingDay};

/// What happened on one day
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DayActivity {
    pub fills: Vec<Fill>,
    pub actions: Vec<Action>,
}

/// End-of-run account state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionReport {
    pub name: String,
    pub days: usize,
    pub orders_submitted: u64,
    pub fills: u64,
    pub final_cash: Decimal,
    pub final_portfolio_value: Decimal,
    pub positions: BTreeMap<InstrumentId, Position>,
}

/// Strategy + paper broker driven by a market tape
pub struct TradingSession {
    name: String,
    strategy: BandStrategy,
    broker: PaperBroker,
    /// Most recent closes, oldest first, capped at what the screen needs
    history: BTreeMap<InstrumentId, Vec<Price>>,
    days: usize,
}

impl TradingSession {
    pub fn new(config: &RunnerConfig) -> Result<Self> {
        Ok(Self {
            name: config.name.clone(),
            strategy: BandStrategy::new(config.strategy_config())?,
            broker: PaperBroker::new(config.initial_cash),
            history: BTreeMap::new(),
            days: 0,
        })
    }

    pub fn strategy(&self) -> &BandStrategy {
        &self.strategy
    }

    pub fn broker(&self) -> &PaperBroker {
        &self.broker
    }

    /// Close history the next screen will see
    pub fn history(&self, instrument_id: &InstrumentId) -> &[Price] {
        self.history
            .get(instrument_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    fn record_closes(&mut self, day: &TradingDay) {
        let keep = self.strategy.required_history();
        for (instrument_id, price) in &day.prices {
            let closes = self.history.entry(instrument_id.clone()).or_default();
            closes.push(*price);
            if closes.len() > keep {
                closes.drain(..closes.len() - keep);
            }
        }
    }

    fn universe(&self, day: &TradingDay) -> Vec<InstrumentHistory> {
        self.history
            .iter()
            .map(|(instrument_id, closes)| InstrumentHistory {
                instrument_id: instrument_id.clone(),
                closes: closes.clone(),
                tradable: day.can_trade(instrument_id),
            })
            .collect()
    }

    /// Run one day of the schedule
    pub fn run_day(&mut self, day: &TradingDay) -> Result<DayActivity> {
        let fills = self.broker.fill_open_orders(day);
        self.broker.mark(day);
        self.record_closes(day);

        let universe = self.universe(day);
        self.strategy.before_trading_start(&universe);

        let mut actions = Vec::new();

        let snapshot = self.broker.snapshot();
        let open_orders = self.broker.open_orders().clone();
        let ctx = StrategyContext {
            portfolio: &snapshot,
            open_orders: &open_orders,
            prices: day,
        };
        let exits = self.strategy.handle_data(&ctx)?;
        for action in &exits {
            self.broker.submit(action, day);
        }
        actions.extend(exits);

        let snapshot = self.broker.snapshot();
        let open_orders = self.broker.open_orders().clone();
        let ctx = StrategyContext {
            portfolio: &snapshot,
            open_orders: &open_orders,
            prices: day,
        };
        let buys = self.strategy.purchase_daily(&ctx)?;
        for action in &buys {
            self.broker.submit(action, day);
        }
        actions.extend(buys);

        self.days += 1;
        Ok(DayActivity { fills, actions })
    }

    /// Run every day on the tape and report the final account state
    pub fn run(&mut self, tape: &MarketTape) -> Result<SessionReport> {
        info!("[{}] Running {} day(s)", self.name, tape.len());

        for day in &tape.days {
            let activity = self.run_day(day)?;
            info!(
                "[{}] {}: {} fill(s), {} action(s), value={}",
                self.name,
                day.date,
                activity.fills.len(),
                activity.actions.len(),
                self.broker.portfolio_value()
            );
        }

        Ok(self.report())
    }

    pub fn report(&self) -> SessionReport {
        SessionReport {
            name: self.name.clone(),
            days: self.days,
            orders_submitted: self.broker.orders_submitted(),
            fills: self.broker.fills(),
            final_cash: self.broker.cash(),
            final_portfolio_value: self.broker.portfolio_value(),
            positions: self
                .broker
                .positions()
                .iter()
                .map(|(instrument_id, position)| (instrument_id.clone(), *position))
                .collect(),
        }
    }
}
