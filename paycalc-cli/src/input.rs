use rust_decimal::Decimal;
use thiserror::Error;

/// Reasons user-supplied text is rejected before it reaches a calculator.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("no amount given")]
    Empty,

    #[error("'{0}' is not a number")]
    NotANumber(String),

    #[error("amount must be greater than zero, got '{0}'")]
    NotPositive(String),

    #[error("percentage must not be negative, got '{0}'")]
    NegativePercent(String),

    #[error("'{value}' is out of range, magnitude must not exceed {limit}")]
    OutOfRange { value: String, limit: Decimal },

    #[error("invalid tax year '{0}', expected YYYY-YY (e.g. 2024-25)")]
    InvalidYearKey(String),
}

/// Largest salary or package amount accepted, in dollars.
pub const MAX_AMOUNT: i64 = 1_000_000_000_000;

/// Largest percentage accepted for super rates and uplifts, in either direction.
pub const MAX_PERCENT: i64 = 10_000;

/// Normalizes input for decimal parsing: trims whitespace and removes the
/// dollar sign and thousands separators.
fn normalize_decimal_input(s: &str) -> String {
    s.trim().replace(['$', ','], "")
}

fn parse_number(s: &str) -> Result<Decimal, InputError> {
    let normalized = normalize_decimal_input(s);
    if normalized.is_empty() {
        return Err(InputError::Empty);
    }
    normalized.parse().map_err(|e| {
        tracing::debug!(input = %s, "invalid decimal: {}", e);
        InputError::NotANumber(s.trim().to_string())
    })
}

/// Parses a salary or package amount such as `"$100,000"`.
///
/// Zero and negative amounts are rejected, as is anything above
/// [`MAX_AMOUNT`].
pub fn parse_amount(s: &str) -> Result<Decimal, InputError> {
    let amount = parse_number(s)?;
    if amount <= Decimal::ZERO {
        return Err(InputError::NotPositive(s.trim().to_string()));
    }
    within(amount, s.trim(), MAX_AMOUNT)
}

/// Parses a percentage where zero is meaningful but negatives are not,
/// e.g. a custom super rate. A trailing `%` is accepted.
pub fn parse_rate_percent(s: &str) -> Result<Decimal, InputError> {
    let percent = parse_number(s.trim().trim_end_matches('%'))?;
    check_rate_percent(percent)
}

/// Range check behind [`parse_rate_percent`], for values that did not come
/// from text (e.g. the settings file).
pub fn check_rate_percent(percent: Decimal) -> Result<Decimal, InputError> {
    if percent < Decimal::ZERO {
        return Err(InputError::NegativePercent(percent.to_string()));
    }
    within(percent, &percent.to_string(), MAX_PERCENT)
}

/// Parses a contract uplift percentage. Values outside the advised band are
/// flagged later, not rejected; only magnitudes above [`MAX_PERCENT`] are.
pub fn parse_uplift_percent(s: &str) -> Result<Decimal, InputError> {
    let percent = parse_number(s.trim().trim_end_matches('%'))?;
    check_uplift_percent(percent)
}

pub fn check_uplift_percent(percent: Decimal) -> Result<Decimal, InputError> {
    within(percent, &percent.to_string(), MAX_PERCENT)
}

fn within(
    value: Decimal,
    raw: &str,
    limit: i64,
) -> Result<Decimal, InputError> {
    let limit = Decimal::from(limit);
    if value.abs() > limit {
        return Err(InputError::OutOfRange {
            value: raw.to_string(),
            limit,
        });
    }
    Ok(value)
}

/// Checks a financial year key has the `YYYY-YY` shape.
pub fn parse_year_key(s: &str) -> Result<String, InputError> {
    let key = s.trim();
    if paycalc_data::is_valid_year_key(key) {
        Ok(key.to_string())
    } else {
        Err(InputError::InvalidYearKey(key.to_string()))
    }
}
