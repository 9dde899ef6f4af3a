//! Rolling price statistics used by the universe screen
//!
//! All functions look at the tail of a close series (oldest first) and
//! return `None` when the series is too short.

use rust_decimal::{Decimal, MathematicalOps};
use tiller_core::Price;

/// Simple moving average of the last `window` closes
pub fn sma(closes: &[Price], window: usize) -> Option<Decimal> {
    if window == 0 || closes.len() < window {
        return None;
    }
    let sum: Decimal = closes[closes.len() - window..].iter().sum();
    Some(sum / Decimal::from(window))
}

/// Population standard deviation (n denominator)
pub fn std_dev(values: &[Decimal]) -> Option<Decimal> {
    if values.is_empty() {
        return None;
    }
    let n = Decimal::from(values.len());
    let mean = values.iter().sum::<Decimal>() / n;
    let variance = values
        .iter()
        .map(|v| (*v - mean) * (*v - mean))
        .sum::<Decimal>()
        / n;
    variance.sqrt()
}

/// Dispersion of the last `window` closes scaled to a year
///
/// Measured on price levels, so an instrument swinging by dollars ranks
/// above one swinging by cents even when the percentage moves are smaller.
pub fn annualized_volatility(
    closes: &[Price],
    window: usize,
    periods_per_year: u32,
) -> Option<Decimal> {
    if window == 0 || closes.len() < window {
        return None;
    }
    let daily = std_dev(&closes[closes.len() - window..])?;
    Some(daily * Decimal::from(periods_per_year).sqrt()?)
}
