//! Decimal formatting utilities for human-readable display.
//!
//! Handles `rust_decimal::Decimal` values rounded to a fixed number of places
//! (half away from zero, like a spreadsheet) and signed percentage changes.

use super::num::group_thousands;
use rust_decimal::{Decimal, RoundingStrategy};

/// Round to `decimals` places, pad with zeros, and group thousands.
///
/// `fixed(&dec("1234.5"), 2)` → `"1,234.50"`.
pub fn fixed(value: &Decimal, decimals: u32) -> String {
    let rounded = value.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
    let precision = decimals as usize;
    group_thousands(format!("{:.precision$}", rounded))
}

/// A change is a gain when it is zero or positive.
pub fn is_gain(change: &Decimal) -> bool {
    !change.is_sign_negative() || change.is_zero()
}

/// Signed 24h change with two decimals: `"+1.23%"`, `"-4.50%"`.
///
/// The sign follows `change`, not the rounded figure: `-0.001` is `"-0.00%"`.
pub fn percent_change(change: &Decimal) -> String {
    let sign = if is_gain(change) { "+" } else { "-" };
    format!("{}{}%", sign, fixed(&change.abs(), 2))
}
