//! Money helpers
//!
//! Prices are stored as f64; all arithmetic goes through `Decimal` and is
//! rounded half away from zero to two places on the way out.

use rust_decimal::prelude::*;

const DECIMAL_PLACES: u32 = 2;

#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    round2(value).to_f64().unwrap_or_default()
}

#[inline]
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// `unit * qty`, rounded
pub fn line_total(unit_price: f64, qty: i64) -> f64 {
    to_f64(to_decimal(unit_price) * Decimal::from(qty))
}

/// Sum of already-rounded amounts, rounded
pub fn sum(amounts: impl IntoIterator<Item = f64>) -> f64 {
    to_f64(amounts.into_iter().map(to_decimal).sum())
}

/// Two-decimal text ("45.00")
pub fn format_amount(value: f64) -> String {
    format!("{:.2}", round2(to_decimal(value)))
}
