//! Exposure targets
//!
//! Fixed for the lifetime of a run. Fractions are passed through as given:
//! nothing checks that long + short stays within 1.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Target leverage and long/short split
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExposureConfig {
    /// Desired (portfolio_value - available cash) / portfolio_value
    pub target_leverage: Decimal,
    /// Share of deployable capital to hold long
    pub target_long_exposure_fraction: Decimal,
    /// Share of deployable capital to hold short
    pub target_short_exposure_fraction: Decimal,
}

impl Default for ExposureConfig {
    fn default() -> Self {
        Self {
            target_leverage: dec!(1.0),
            target_long_exposure_fraction: dec!(0.5),
            target_short_exposure_fraction: dec!(0.5),
        }
    }
}

impl ExposureConfig {
    pub fn new(
        target_leverage: Decimal,
        target_long_exposure_fraction: Decimal,
        target_short_exposure_fraction: Decimal,
    ) -> Self {
        Self {
            target_leverage,
            target_long_exposure_fraction,
            target_short_exposure_fraction,
        }
    }

    /// Fully invested, long only, no borrowing
    pub fn long_only() -> Self {
        Self::new(dec!(1.0), dec!(1.0), Decimal::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_split_evenly() {
        let config = ExposureConfig::default();
        assert_eq!(config.target_leverage, dec!(1.0));
        assert_eq!(config.target_long_exposure_fraction, dec!(0.5));
        assert_eq!(config.target_short_exposure_fraction, dec!(0.5));
    }

    #[test]
    fn test_parse_partial_json() {
        let json = r#"{ "target_long_exposure_fraction": "1.0", "target_short_exposure_fraction": 0 }"#;
        let config: ExposureConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.target_leverage, dec!(1.0));
        assert_eq!(config.target_long_exposure_fraction, dec!(1.0));
        assert_eq!(config.target_short_exposure_fraction, Decimal::ZERO);
    }

    #[test]
    fn test_fractions_are_not_validated() {
        let config = ExposureConfig::new(dec!(2.0), dec!(0.9), dec!(0.9));
        assert_eq!(
            config.target_long_exposure_fraction + config.target_short_exposure_fraction,
            dec!(1.8)
        );
    }
}
