//! Display formatting for amounts and percentages.
//!
//! Formatting works on copies; stored values keep their full precision.

use rust_decimal::{Decimal, RoundingStrategy};

/// `$` followed by the amount rounded to two decimals, e.g. `$50.00`, `$-8.00`.
pub fn format_currency(amount: Decimal) -> String {
    format!("${}", fixed(amount, 2))
}

/// The percentage rounded to one decimal with a trailing `%`, e.g. `60.0%`.
pub fn format_percentage(percentage: Decimal) -> String {
    format!("{}%", fixed(percentage, 1))
}

/// Round half away from zero to `dp` places, then pad to exactly `dp` places.
fn fixed(value: Decimal, dp: u32) -> String {
    let mut rounded = value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    // Rounding a small negative value can leave a negative zero behind.
    if rounded.is_zero() {
        rounded = Decimal::ZERO;
    }
    rounded.rescale(dp);
    rounded.to_string()
}
