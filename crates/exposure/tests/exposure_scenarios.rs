//! Exposure Manager Scenarios
//!
//! Walks the manager through the situations a strategy hits tick to tick:
//! 1. Flat account sizing its first purchase
//! 2. Long book with a resting buy on a new name
//! 3. Short book marked against a loss
//! 4. Sells that close longs while new orders are pending
//! 5. Repeated updates against the same snapshot

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashMap;
use tiller_core::{InstrumentId, OpenOrder, OpenOrders, PortfolioSnapshot, Price};
use tiller_exposure::{ExposureConfig, ExposureManager, LongShort};

fn price_map(entries: &[(&str, Decimal)]) -> HashMap<InstrumentId, Price> {
    entries
        .iter()
        .map(|(id, price)| (InstrumentId::from(*id), *price))
        .collect()
}

#[test]
fn test_flat_account_long_only_budget() {
    let _ = env_logger::try_init();

    let portfolio = PortfolioSnapshot::new(dec!(100000), dec!(100000));
    let mut manager = ExposureManager::new(dec!(1.0), dec!(1.0), dec!(0.0));
    manager.update(&portfolio, &OpenOrders::new(), &price_map(&[]));

    let available = manager
        .available_cash(portfolio.cash, portfolio.portfolio_value, false)
        .unwrap();
    assert_eq!(available, dec!(100000));

    let per_side = manager
        .available_cash_long_short(portfolio.cash, portfolio.portfolio_value, true)
        .unwrap();
    assert_eq!(per_side, LongShort::new(dec!(100000), dec!(0)));

    let leverage = manager
        .current_leverage(portfolio.cash, portfolio.portfolio_value, true)
        .unwrap();
    assert_eq!(leverage, Decimal::ZERO);
}

#[test]
fn test_long_position_plus_pending_buy_on_other_name() {
    let _ = env_logger::try_init();

    let portfolio = PortfolioSnapshot::new(dec!(5000), dec!(10000))
        .with_position("HELD", dec!(100), dec!(50), dec!(48));

    let mut open_orders = OpenOrders::new();
    open_orders.insert(InstrumentId::from("NEW"), vec![OpenOrder::new(dec!(200))]);

    let mut manager = ExposureManager::with_config(ExposureConfig::default());
    manager.update(
        &portfolio,
        &open_orders,
        &price_map(&[("HELD", dec!(51)), ("NEW", dec!(10))]),
    );

    assert_eq!(manager.state().realized_long, dec!(5000));
    assert_eq!(manager.state().pending_long, dec!(2000));
    assert_eq!(
        manager.long_short_exposure(true),
        LongShort::new(dec!(7000), dec!(0))
    );
    assert_eq!(
        manager.long_short_exposure(false),
        LongShort::new(dec!(5000), dec!(0))
    );
    assert_eq!(manager.total_exposure(true), dec!(7000));
}

#[test]
fn test_short_position_leverage_after_loss() {
    let portfolio = PortfolioSnapshot::new(dec!(10000), dec!(9000))
        .with_position("SHORTED", dec!(-50), dec!(20), dec!(15));

    let mut manager = ExposureManager::with_config(ExposureConfig::default());
    manager.update(&portfolio, &OpenOrders::new(), &price_map(&[]));

    assert_eq!(manager.state().realized_short, dec!(1000));

    // (9000 - (10000 - 2 * 1000)) / 9000
    let leverage = manager
        .current_leverage(portfolio.cash, portfolio.portfolio_value, true)
        .unwrap();
    assert_eq!(leverage, dec!(1000) / dec!(9000));
    assert!((leverage - dec!(0.1111)).abs() < dec!(0.0001));
}

#[test]
fn test_exposure_sum_matches_position_notional() {
    let portfolio = PortfolioSnapshot::new(dec!(0), dec!(50000))
        .with_position("A", dec!(10), dec!(12.5), dec!(10))
        .with_position("B", dec!(-40), dec!(3.25), dec!(4))
        .with_position("C", dec!(7), dec!(101), dec!(99))
        .with_position("D", dec!(-1), dec!(2000), dec!(1800))
        .with_position("E", dec!(0), dec!(55), dec!(55));

    let mut manager = ExposureManager::with_config(ExposureConfig::default());
    manager.update(&portfolio, &OpenOrders::new(), &price_map(&[]));

    let expected_total: Decimal = portfolio
        .positions
        .values()
        .map(|p| p.quantity.abs() * p.last_price)
        .sum();

    let state = manager.state();
    assert_eq!(state.realized_long + state.realized_short, expected_total);
    assert_eq!(state.realized_long, dec!(125) + dec!(707));
    assert_eq!(state.realized_short, dec!(130) + dec!(2000));
}

#[test]
fn test_closing_sell_is_not_new_short_exposure() {
    let portfolio = PortfolioSnapshot::new(dec!(1000), dec!(6000))
        .with_position("HELD", dec!(100), dec!(50), dec!(45));

    let mut open_orders = OpenOrders::new();
    open_orders.insert(
        InstrumentId::from("HELD"),
        vec![OpenOrder::new(dec!(-100)).with_filled(dec!(-30))],
    );
    open_orders.insert(
        InstrumentId::from("IDLE"),
        vec![OpenOrder::new(dec!(25)).with_filled(dec!(25))],
    );

    let mut manager = ExposureManager::with_config(ExposureConfig::default());
    manager.update(
        &portfolio,
        &open_orders,
        &price_map(&[("HELD", dec!(50)), ("IDLE", dec!(8))]),
    );

    let state = manager.state();
    assert_eq!(state.pending_long, Decimal::ZERO);
    assert_eq!(state.pending_short, Decimal::ZERO);
    assert_eq!(state.realized_long, dec!(5000));
}

#[test]
fn test_fraction_zero_when_nothing_deployed_or_available() {
    // Target leverage 0 removes the whole portfolio value from buying power
    let portfolio = PortfolioSnapshot::new(dec!(1000), dec!(1000));
    let mut manager = ExposureManager::new(dec!(0.0), dec!(1.0), dec!(0.0));
    manager.update(&portfolio, &OpenOrders::new(), &price_map(&[]));

    assert_eq!(
        manager.available_cash(portfolio.cash, portfolio.portfolio_value, true).unwrap(),
        Decimal::ZERO
    );
    let fraction = manager
        .long_short_exposure_fraction(portfolio.cash, portfolio.portfolio_value, true, true)
        .unwrap();
    assert_eq!(fraction, LongShort::default());
}

#[test]
fn test_fraction_includes_unused_cash() {
    let portfolio = PortfolioSnapshot::new(dec!(5000), dec!(10000))
        .with_position("HELD", dec!(100), dec!(50), dec!(50));

    let mut manager = ExposureManager::new(dec!(1.0), dec!(1.0), dec!(0.0));
    manager.update(&portfolio, &OpenOrders::new(), &price_map(&[]));

    let fraction = manager
        .long_short_exposure_fraction(portfolio.cash, portfolio.portfolio_value, true, true)
        .unwrap();
    assert_eq!(fraction, LongShort::new(dec!(0.5), dec!(0)));

    let deployed_only = manager
        .long_short_exposure_fraction(portfolio.cash, portfolio.portfolio_value, true, false)
        .unwrap();
    assert_eq!(deployed_only, LongShort::new(dec!(1), dec!(0)));
}

#[test]
fn test_repeated_update_is_idempotent() {
    let portfolio = PortfolioSnapshot::new(dec!(2500), dec!(10000))
        .with_position("A", dec!(100), dec!(40), dec!(38))
        .with_position("B", dec!(-20), dec!(25), dec!(30));

    let mut open_orders = OpenOrders::new();
    open_orders.insert(
        InstrumentId::from("C"),
        vec![OpenOrder::new(dec!(10)), OpenOrder::new(dec!(-5))],
    );
    let prices = price_map(&[("A", dec!(41)), ("C", dec!(12))]);

    let mut manager = ExposureManager::with_config(ExposureConfig::default());
    manager.update(&portfolio, &open_orders, &prices);
    let first = manager.state();

    manager.update(&portfolio, &open_orders, &prices);
    assert_eq!(manager.state(), first);
    assert_eq!(first.pending_long, dec!(120));
    assert_eq!(first.pending_short, dec!(60));
}
