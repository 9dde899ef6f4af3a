//! Tiller Core Domain
//!
//! Plain records describing what the hosting platform hands to the trading
//! logic on every tick: the portfolio, its positions, and the orders still
//! resting on the book. No I/O, no async, 100% unit testable.

pub mod entities;
pub mod values;

// Re-export commonly used types at crate root
pub use entities::{InstrumentId, OpenOrder, OpenOrders, PortfolioSnapshot, Position};
pub use values::{Price, Quantity};
