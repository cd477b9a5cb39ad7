//! Number formatting utilities for human-readable display.
//!
//! Grouping works on the textual form of a number so that any `Display` value
//! (integers, `Decimal`, pre-formatted strings) can be grouped without a float
//! round trip. For rounding to fixed decimal places, use the `decimal` sibling module.

use rust_decimal::Decimal;

/// Number of trailing digits dropped when scaling to millions.
const MILLION_DIGITS: usize = 6;

/// Inserts `,` every three digits of the integer part, counting leftward from the
/// decimal point. The sign and the fractional part are left untouched.
pub fn group_thousands(value: impl std::fmt::Display) -> String {
    let text = value.to_string();
    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, c) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    match fraction {
        Some(fraction) => format!("{sign}{grouped}.{fraction}"),
        None => format!("{sign}{grouped}"),
    }
}

/// Drops the last six digits of the integer part of `value`.
///
/// This is textual truncation, not rounding: `1_234_567_890` becomes `"1234"`.
/// Any fractional part is discarded first. Values with six or fewer integer
/// digits are sub-million and yield `"0"`.
pub fn to_millions_truncated(value: impl Into<Decimal>) -> String {
    let value: Decimal = value.into();
    let digits = value.trunc().abs().normalize().to_string();

    if digits.len() <= MILLION_DIGITS {
        return "0".to_string();
    }

    let kept = &digits[..digits.len() - MILLION_DIGITS];
    if value.is_sign_negative() {
        format!("-{kept}")
    } else {
        kept.to_string()
    }
}

/// Truncated millions with thousands separators, e.g. `1_234_567_890_123` → `"1,234,567"`.
pub fn millions(value: impl Into<Decimal>) -> String {
    group_thousands(to_millions_truncated(value))
}
