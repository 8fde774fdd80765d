//! Permanent salary to contractor rate conversion.
//!
//! A contractor rate is the base salary plus an uplift covering leave, super,
//! insurance and gaps between contracts. The advised band is 15–30%, but the
//! converter applies whatever uplift it is given; the band is reported
//! alongside so callers can flag unusual values.
//!
//! ```
//! use rust_decimal_macros::dec;
//! use paycalc_core::calculations::contract::calculate_contract_rate;
//!
//! let result = calculate_contract_rate(dec!(100000), None);
//!
//! assert_eq!(result.contract_annual.selected, dec!(120000));
//! assert_eq!(result.contract_monthly, dec!(10000));
//! ```

use rust_decimal::Decimal;
use tracing::debug;

use crate::calculations::common::{MONTHS_PER_YEAR, per_period, uplift};
use crate::{ContractCalculationResult, ContractRange};

pub const MIN_UPLIFT: Decimal = Decimal::from_parts(15, 0, 0, false, 0);
pub const MAX_UPLIFT: Decimal = Decimal::from_parts(30, 0, 0, false, 0);
pub const DEFAULT_UPLIFT: Decimal = Decimal::from_parts(20, 0, 0, false, 0);

/// Billable days assumed in a year, after weekends, leave and public holidays.
pub const WORKING_DAYS_PER_YEAR: u32 = 230;

/// Converts a base salary into contractor annual, monthly and daily rates.
///
/// `uplift_percentage` defaults to [`DEFAULT_UPLIFT`] and is not clamped to
/// the advised band.
pub fn calculate_contract_rate(
    base_annual_salary: Decimal,
    uplift_percentage: Option<Decimal>,
) -> ContractCalculationResult {
    let uplift_percentage = uplift_percentage.unwrap_or(DEFAULT_UPLIFT);

    let contract_annual = ContractRange {
        min: uplift(base_annual_salary, MIN_UPLIFT),
        max: uplift(base_annual_salary, MAX_UPLIFT),
        selected: uplift(base_annual_salary, uplift_percentage),
    };
    debug!(
        base = %base_annual_salary,
        uplift = %uplift_percentage,
        selected = %contract_annual.selected,
        "converted salary to contract rate"
    );

    ContractCalculationResult {
        base_annual_salary,
        contract_monthly: per_period(contract_annual.selected, MONTHS_PER_YEAR),
        contract_daily: per_period(contract_annual.selected, WORKING_DAYS_PER_YEAR),
        contract_annual,
        uplift_percentage,
    }
}
