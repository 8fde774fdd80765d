//! Display formatting for money and rates.

use paycalc_core::calculations::common::round_half_up;
use rust_decimal::Decimal;

/// Formats an amount as Australian dollars, e.g. `$1,234.56` or `-$1,234.56`.
///
/// Rounds half-up to cents first, so `-0.004` prints as `$0.00`.
pub fn format_aud(value: Decimal) -> String {
    let rounded = round_half_up(value);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };

    let plain = format!("{:.2}", rounded.abs());
    let (whole, cents) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));

    format!("{sign}${}.{cents}", group_thousands(whole))
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Formats a fractional rate as a percentage: `0.115` becomes `11.5%`.
pub fn format_rate(rate: Decimal) -> String {
    format_percent(rate * Decimal::ONE_HUNDRED)
}

/// Formats a value that is already a percentage: `20` becomes `20%`.
pub fn format_percent(percent: Decimal) -> String {
    format!("{}%", percent.normalize())
}
