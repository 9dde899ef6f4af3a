//! Tiller Runner - daily trading session
//!
//! Hosts the band strategy the way a trading platform would:
//!
//! - **Config**: JSON configuration for capital, exposure targets, screen and bands
//! - **Tape**: daily closing prices and trading halts
//! - **Paper Broker**: resting orders, next-day fills, cash and cost basis
//! - **Session**: the daily schedule tying strategy and broker together
//!
//! ## Architecture
//!
//! ```text
//!   MarketTape ──► TradingDay ──┬──► PaperBroker (fill, mark)
//!                               │          │ PortfolioSnapshot / OpenOrders
//!                               │          ▼
//!                               └──► BandStrategy ──► Actions ──► PaperBroker (submit)
//! ```

pub mod broker;
pub mod config;
pub mod error;
pub mod session;
pub mod tape;

// Re-export main types
pub use broker::{Fill, PaperBroker};
pub use config::RunnerConfig;
pub use error::{ConfigError, Result, RunnerError};
pub use session::{DayActivity, SessionReport, TradingSession};
pub use tape::{MarketTape, TradingDay};
