//! Money
//!
//! Amounts are carried as [`Decimal`] during aggregation and only rounded to
//! minor units when they are displayed or persisted.

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use rusty_money::{
    Money,
    iso::{self, Currency},
};

/// Currency used for reports, charts and the dashboard.
pub const DEFAULT_CURRENCY: &Currency = iso::USD;

/// Number of decimal places displayed for monetary amounts.
pub const DISPLAY_DECIMALS: u32 = 2;

/// Converts an amount to minor units (cents), rounding half away from zero.
///
/// Returns `None` if the amount does not fit in an `i64` once scaled.
pub fn to_minor_units(amount: Decimal) -> Option<i64> {
    amount
        .checked_mul(Decimal::ONE_HUNDRED)
        .map(|value| value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|value| value.to_i64())
}

/// Converts minor units (cents) back into a decimal amount.
pub fn from_minor_units(minor: i64) -> Decimal {
    Decimal::new(minor, DISPLAY_DECIMALS)
}

/// Rounds an amount for display and pins it to two decimal places.
pub fn round_for_display(amount: Decimal) -> Decimal {
    let mut rounded =
        amount.round_dp_with_strategy(DISPLAY_DECIMALS, RoundingStrategy::MidpointAwayFromZero);

    rounded.rescale(DISPLAY_DECIMALS);

    rounded
}

/// Formats an amount with the currency's symbol and digit grouping, e.g. `$1,234.56`.
pub fn format_amount(amount: Decimal, currency: &'static Currency) -> String {
    match to_minor_units(amount) {
        Some(minor) => format!("{}", Money::from_minor(minor, currency)),
        None => round_for_display(amount).to_string(),
    }
}

/// Converts an amount to `f64` for chart geometry.
pub fn to_f64(amount: Decimal) -> f64 {
    amount.to_f64().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_minor_units_rounds_half_away_from_zero() {
        assert_eq!(to_minor_units(Decimal::new(12345, 3)), Some(1235));
        assert_eq!(to_minor_units(Decimal::new(-12345, 3)), Some(-1235));
    }

    #[test]
    fn from_minor_units_has_two_decimals() {
        assert_eq!(from_minor_units(1999).to_string(), "19.99");
    }

    #[test]
    fn round_for_display_pads_scale() {
        assert_eq!(round_for_display(Decimal::from(55)).to_string(), "55.00");
        assert_eq!(round_for_display(Decimal::new(1_666_666, 5)).to_string(), "16.67");
    }

    #[test]
    fn format_amount_uses_currency_symbol_and_grouping() {
        assert_eq!(format_amount(Decimal::new(123_456, 2), iso::USD), "$1,234.56");
    }
}
