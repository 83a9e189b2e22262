//! Money calculation utilities using rust_decimal for precision
//!
//! Prices are stored and serialized as `f64`; every calculation goes through
//! `Decimal` and is rounded back to 2 decimal places.

use rust_decimal::prelude::*;

/// Rounding strategy for monetary values (2 decimal places, half away from zero)
const DECIMAL_PLACES: u32 = 2;

/// Convert f64 to Decimal for calculation
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Scale a price by `factor`, rounded to cents
pub fn scale_price(price: f64, factor: Decimal) -> f64 {
    to_f64(to_decimal(price) * factor)
}

/// Raw discount percentage `round((1 - price / original) * 100)`
///
/// Negative when `original < price`. Returns 0 when `original` is zero.
pub fn raw_discount_percent(price: f64, original: f64) -> i64 {
    let original = to_decimal(original);
    if original.is_zero() {
        return 0;
    }
    let ratio = Decimal::ONE - to_decimal(price) / original;
    (ratio * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .unwrap_or_default()
}
