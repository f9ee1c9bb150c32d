//! Shared helpers for parsing and displaying monetary amounts.

use std::str::FromStr;

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// Values at exactly 0.005 are rounded away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use costing_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Formats an amount with exactly two decimals, e.g. `400` -> `"400.00"`.
pub fn format_amount(value: Decimal) -> String {
    let mut rounded = round_half_up(value);
    rounded.rescale(2);
    rounded.to_string()
}

/// Why an amount could not be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountError {
    /// Empty, not a number, or not finite.
    Invalid,
    /// A finite number whose magnitude does not fit in a decimal.
    OutOfRange,
}

/// Smallest magnitude that survives rounding to 28 decimal places.
const SMALLEST_NONZERO: f64 = 5e-29;

/// Reads an amount typed by a user or sent by a client.
///
/// Surrounding whitespace is ignored. Plain decimal (`"1234.5"`, `"-3"`) and
/// scientific (`"1e3"`) notation are accepted; digit separators (`_`) are
/// not. Numbers with more precision than a decimal holds are rounded, so
/// `"1e-29"` reads as zero.
pub fn read_amount(s: &str) -> Result<Decimal, AmountError> {
    let trimmed = s.trim();
    if trimmed.is_empty() || trimmed.contains('_') {
        return Err(AmountError::Invalid);
    }
    let exact = Decimal::from_str(trimmed).or_else(|_| Decimal::from_scientific(trimmed));
    if let Ok(value) = exact {
        return Ok(value);
    }

    let value: f64 = trimmed.parse().map_err(|_| AmountError::Invalid)?;
    if !value.is_finite() {
        return Err(AmountError::Invalid);
    }
    if value.abs() < SMALLEST_NONZERO {
        return Ok(Decimal::ZERO);
    }
    Decimal::from_f64(value).ok_or(AmountError::OutOfRange)
}
