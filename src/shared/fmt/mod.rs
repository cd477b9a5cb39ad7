//! Display formatting for prices, percentages, and market caps.

pub mod decimal;
pub mod num;

pub use decimal::{fixed, is_gain, percent_change};
pub use num::{group_thousands, millions, to_millions_truncated};
