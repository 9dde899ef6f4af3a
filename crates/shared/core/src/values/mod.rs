use rust_decimal::Decimal;

/// Price value - uses Decimal for precision
pub type Price = Decimal;

/// Quantity value - signed, positive = long / buy, negative = short / sell
pub type Quantity = Decimal;
