//! Tiller Strategy
//!
//! A long-only daily strategy built on the exposure manager:
//! - Universe screen (price, moving-average momentum, volatility rank)
//! - Stop-loss / take-profit bands around cost basis
//! - Purchases sized from the buying power the target leverage allows
//!
//! ## Architecture
//!
//! ```text
//!  Close history ──► UniverseScreen ──► Candidates
//!                                           │
//!                                           ▼
//!  PortfolioSnapshot ─┐               ┌──────────────┐
//!  OpenOrders ────────┼─────────────► │ BandStrategy │ ◄── ExitBands
//!  PriceSource ───────┘               └──────┬───────┘
//!                                            │ uses
//!                                            ▼
//!                                     ExposureManager
//!                                            │
//!                                            ▼
//!                                   Actions (BuyValue / Close)
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tiller_strategy::{BandStrategy, StrategyConfig, StrategyContext};
//!
//! let mut strategy = BandStrategy::new(StrategyConfig::default())?;
//! strategy.before_trading_start(&universe);
//! let buys = strategy.purchase_daily(&ctx)?;
//! let exits = strategy.handle_data(&ctx)?;
//! ```

pub mod bands;
pub mod error;
pub mod indicators;
pub mod screen;
pub mod strategy;

// Re-export main types
pub use bands::{ExitBands, ExitReason};
pub use error::{Result, StrategyError};
pub use screen::{Candidate, InstrumentHistory, ScreenConfig, UniverseScreen};
pub use strategy::{Action, BandStrategy, StrategyConfig, StrategyContext};
