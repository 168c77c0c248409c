use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

/// Number of decimal places used for every monetary value shown or exported.
pub const MONEY_SCALE: u32 = 2;

/// Largest quantity, price or line total accepted, in whole units.
/// Anything above counts as zero, like unparseable input.
pub const MAX_AMOUNT_UNITS: i64 = 1_000_000_000_000_000;

/// Whether `value` lies within `0..=MAX_AMOUNT_UNITS`.
pub fn is_in_range(value: Decimal) -> bool {
    !value.is_sign_negative() && value <= Decimal::from(MAX_AMOUNT_UNITS)
}

/// Parse user-typed text into a non-negative decimal.
///
/// Accepts `.` or `,` as the decimal separator. Empty, unparseable, negative
/// and out-of-range input all yield zero; the caller keeps the raw text untouched.
/// Example: "12,5" -> 12.5, "abc" -> 0, "-3" -> 0
pub fn parse_amount(input: &str) -> Decimal {
    let normalized = input.trim().replace(',', ".");
    if normalized.is_empty() {
        return Decimal::ZERO;
    }

    match Decimal::from_str(&normalized) {
        Ok(value) if is_in_range(value) => value,
        _ => Decimal::ZERO,
    }
}

/// Round to two decimal places, half away from zero.
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Format a value with exactly two decimals.
/// Example: 0 -> "0.00", 12.5 -> "12.50", 183.3333 -> "183.33"
pub fn format_money(value: Decimal) -> String {
    let mut rounded = round_money(value);
    rounded.rescale(MONEY_SCALE);
    if rounded.is_zero() {
        // -0.00 is never shown
        rounded.set_sign_positive(true);
    }
    rounded.to_string()
}
