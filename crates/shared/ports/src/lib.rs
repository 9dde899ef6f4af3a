//! Tiller Ports
//!
//! Port definitions (traits) for the Tiller trading system.
//! These define the boundaries between trading logic and the hosting platform.

mod price;

pub use price::PriceSource;
