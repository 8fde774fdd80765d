//! Shared helpers for the pay calculations.
//!
//! Percent/fraction conversion, per-period division and cent rounding used by
//! both the take-home calculator and the contract rate converter.

use rust_decimal::{Decimal, RoundingStrategy};

pub const MONTHS_PER_YEAR: u32 = 12;
pub const FORTNIGHTS_PER_YEAR: u32 = 26;

/// Rounds a decimal value to whole cents using half-up rounding.
///
/// Values at exactly 0.005 are rounded away from zero. The calculators never
/// call this themselves; it is for presenting their unrounded results.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use paycalc_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(6433.8333)), dec!(6433.83));
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46)); // Away from zero
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Converts a percentage such as `11.5` into the fraction `0.115`.
///
/// ```
/// use rust_decimal_macros::dec;
/// use paycalc_core::calculations::common::percent_to_fraction;
///
/// assert_eq!(percent_to_fraction(dec!(11.5)), dec!(0.115));
/// ```
pub fn percent_to_fraction(percent: Decimal) -> Decimal {
    percent / Decimal::ONE_HUNDRED
}

/// Scales `amount` up by `percent`, e.g. `uplift(100000, 20) == 120000`.
pub fn uplift(
    amount: Decimal,
    percent: Decimal,
) -> Decimal {
    amount * (Decimal::ONE + percent_to_fraction(percent))
}

/// Splits an annual figure evenly over `periods` pay periods.
pub fn per_period(
    annual: Decimal,
    periods: u32,
) -> Decimal {
    annual / Decimal::from(periods)
}
