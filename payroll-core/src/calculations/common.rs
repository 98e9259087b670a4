//! Common utility functions for payroll calculations.
//!
//! Every monetary amount that leaves a calculator is a whole number of Dong.
//! Intermediate arithmetic is carried out in [`Decimal`] and converted back
//! with one of the rounding helpers in this module.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// An amount of Vietnamese Dong. The currency has no fractional subunit.
pub type Dong = i64;

/// Rounds a decimal amount to the nearest whole Dong using half-up rounding.
///
/// Values at exactly 0.5 are rounded away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use payroll_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(2399999.92)), 2400000);
/// assert_eq!(round_half_up(dec!(1000.5)), 1001);
/// assert_eq!(round_half_up(dec!(1000.49)), 1000);
/// assert_eq!(round_half_up(dec!(-1000.5)), -1001);
/// ```
pub fn round_half_up(value: Decimal) -> Dong {
    to_dong(value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
}

/// Rounds a decimal amount toward zero, dropping any fraction of a Dong.
///
/// Personal income tax is always rounded this way.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use payroll_core::calculations::common::round_down;
///
/// assert_eq!(round_down(dec!(217499.85)), 217499);
/// assert_eq!(round_down(dec!(250000)), 250000);
/// ```
pub fn round_down(value: Decimal) -> Dong {
    to_dong(value.trunc())
}

/// Clamps an amount at zero.
pub fn non_negative(value: Dong) -> Dong {
    value.max(0)
}

/// Converts a whole-Dong amount into a [`Decimal`] for intermediate arithmetic.
pub fn dong(amount: Dong) -> Decimal {
    Decimal::from(amount)
}

/// Formats an amount with `,` as the thousands separator.
///
/// # Examples
///
/// ```
/// use payroll_core::calculations::common::group_thousands;
///
/// assert_eq!(group_thousands(1_000_000_000), "1,000,000,000");
/// assert_eq!(group_thousands(-4_960_000), "-4,960,000");
/// assert_eq!(group_thousands(999), "999");
/// ```
pub fn group_thousands(value: Dong) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        grouped.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

// Saturates instead of failing; validated inputs stay far inside i64.
fn to_dong(value: Decimal) -> Dong {
    value.to_i64().unwrap_or(if value.is_sign_negative() {
        Dong::MIN
    } else {
        Dong::MAX
    })
}
