//! Tiller Exposure Manager
//!
//! Leverage and long/short exposure accounting for a single strategy:
//!
//! - **Realized exposure**: value of held positions, split by direction
//! - **Pending exposure**: capital tied up by orders that have not filled yet
//! - **Buying power**: cash available under a target leverage
//! - **Allocation**: capital still needed per side to hit the target long/short split
//!
//! ## Flow
//!
//! ```text
//! Scheduler tick
//!      │
//!      ▼
//! PortfolioSnapshot ──┐
//! OpenOrders ─────────┼──► ExposureManager::update ──► ExposureState
//! PriceSource ────────┘                                      │
//!                                                            ▼
//!                         current_leverage / available_cash / available_cash_long_short
//!                                                            │
//!                                                            ▼
//!                                                      Order sizing
//! ```
//!
//! State is rebuilt from scratch on every `update`; nothing carries over
//! between ticks.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tiller_exposure::ExposureManager;
//!
//! let mut exposure = ExposureManager::new(dec!(1.0), dec!(1.0), dec!(0.0));
//! exposure.update(&portfolio, &open_orders, &prices);
//!
//! let budget = exposure.available_cash(portfolio.cash, portfolio.portfolio_value, false)?;
//! ```

pub mod config;
pub mod error;
pub mod manager;
pub mod shared;

// Re-export main types
pub use config::ExposureConfig;
pub use error::{ExposureError, Result};
pub use manager::{ExposureManager, ExposureState, LongShort};
pub use shared::SharedExposureManager;
