//! Canned sale histories for demos and tests.

use core_types::RawSale;
use rust_decimal::Decimal;

/// Five sales of one card between January and March 2024.
///
/// This is the reference history the `demo` command analyzes when no real
/// sales data is supplied.
pub fn mock_sales() -> Vec<RawSale> {
    [
        ("2024-01-01", 100),
        ("2024-01-15", 110),
        ("2024-02-01", 105),
        ("2024-02-15", 115),
        ("2024-03-01", 120),
    ]
    .into_iter()
    .map(|(date, price)| RawSale::new(Decimal::from(price), date))
    .collect()
}
