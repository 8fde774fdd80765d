//! Take-home pay from a gross salary or a super-inclusive package.
//!
//! # Steps
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Resolve the financial year from the registry |
//! | 2    | Effective super rate (custom percent / 100, else the year's rate) |
//! | 3    | Split the input into gross and super |
//! | 4    | Income tax on gross via the progressive schedule |
//! | 5    | Medicare levy: gross × levy rate, no threshold or phase-in |
//! | 6    | Net annual, then monthly (÷ 12) and fortnightly (÷ 26) |
//!
//! When the input includes super it is treated as a total package and super
//! is backed out: `gross = package / (1 + rate)`. Otherwise super is paid on
//! top: `super = gross × rate`.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use paycalc_core::{SalaryInput, TaxYearRegistry};
//! use paycalc_core::calculations::TakeHomeCalculator;
//!
//! let registry = TaxYearRegistry::with_builtin_years();
//! let calculator = TakeHomeCalculator::new(&registry);
//!
//! let result = calculator
//!     .calculate(&SalaryInput::new(dec!(100000), "2024-25"))
//!     .unwrap();
//!
//! assert_eq!(result.tax, dec!(20794));
//! assert_eq!(result.medicare_levy, dec!(2000));
//! assert_eq!(result.net_annual, dec!(77206));
//! assert_eq!(result.superannuation, dec!(11500));
//! ```

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::debug;

use crate::calculations::common::{
    FORTNIGHTS_PER_YEAR, MONTHS_PER_YEAR, per_period, percent_to_fraction,
};
use crate::calculations::progressive::compute_tax;
use crate::{SalaryCalculationResult, SalaryInput, TaxYear, TaxYearRegistry};

/// Errors that can occur during take-home calculations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CalculationError {
    /// The requested financial year is not in the registry.
    #[error("tax year {0} not found")]
    UnknownTaxYear(String),
}

/// Gross salary and super after splitting the input amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Decomposition {
    gross: Decimal,
    superannuation: Decimal,
}

/// Net pay over the three reporting periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct NetFigures {
    annual: Decimal,
    monthly: Decimal,
    fortnightly: Decimal,
}

/// Calculator for take-home pay against a registry of financial years.
///
/// Holds only a borrow of the registry; every call reads the years as they
/// stand at that moment and keeps no state between calls.
#[derive(Debug, Clone, Copy)]
pub struct TakeHomeCalculator<'a> {
    registry: &'a TaxYearRegistry,
}

impl<'a> TakeHomeCalculator<'a> {
    pub fn new(registry: &'a TaxYearRegistry) -> Self {
        Self { registry }
    }

    /// Calculates the full take-home breakdown for `input`.
    ///
    /// The caller is expected to have rejected non-positive salaries; the
    /// calculator does not check.
    ///
    /// # Errors
    ///
    /// Returns [`CalculationError::UnknownTaxYear`] if `input.year` is not
    /// registered.
    pub fn calculate(
        &self,
        input: &SalaryInput,
    ) -> Result<SalaryCalculationResult, CalculationError> {
        let tax_year = self.resolve_year(&input.year)?;

        let super_rate = self.effective_super_rate(tax_year, input.custom_super_rate_percent);
        debug!(
            year = %tax_year.year,
            %super_rate,
            including_super = input.including_super,
            "resolved take-home inputs"
        );

        let Decomposition {
            gross,
            superannuation,
        } = self.decompose(input.gross, super_rate, input.including_super);

        let tax = compute_tax(gross, &tax_year.brackets);
        let medicare_levy = self.medicare_levy(gross, tax_year.medicare_levy);
        let net = self.net_figures(gross, tax, medicare_levy);

        Ok(SalaryCalculationResult {
            gross_annual: gross,
            tax,
            medicare_levy,
            net_annual: net.annual,
            net_monthly: net.monthly,
            net_fortnightly: net.fortnightly,
            superannuation,
        })
    }

    fn resolve_year(
        &self,
        year_key: &str,
    ) -> Result<&'a TaxYear, CalculationError> {
        self.registry.require(year_key)
    }

    /// Custom percent wins over the year's default rate.
    fn effective_super_rate(
        &self,
        tax_year: &TaxYear,
        custom_percent: Option<Decimal>,
    ) -> Decimal {
        custom_percent.map_or(tax_year.super_rate, percent_to_fraction)
    }

    fn decompose(
        &self,
        amount: Decimal,
        super_rate: Decimal,
        including_super: bool,
    ) -> Decomposition {
        if including_super {
            let gross = amount / (Decimal::ONE + super_rate);
            Decomposition {
                gross,
                superannuation: amount - gross,
            }
        } else {
            Decomposition {
                gross: amount,
                superannuation: amount * super_rate,
            }
        }
    }

    fn medicare_levy(
        &self,
        gross: Decimal,
        levy_rate: Decimal,
    ) -> Decimal {
        gross * levy_rate
    }

    fn net_figures(
        &self,
        gross: Decimal,
        tax: Decimal,
        medicare_levy: Decimal,
    ) -> NetFigures {
        let annual = gross - tax - medicare_levy;
        NetFigures {
            annual,
            monthly: per_period(annual, MONTHS_PER_YEAR),
            fortnightly: per_period(annual, FORTNIGHTS_PER_YEAR),
        }
    }
}

/// Convenience wrapper over [`TakeHomeCalculator::calculate`].
///
/// `custom_super_rate` is a percentage, e.g. `12` for 12%.
pub fn calculate_take_home_salary(
    registry: &TaxYearRegistry,
    gross_annual: Decimal,
    year_key: &str,
    including_super: bool,
    custom_super_rate: Option<Decimal>,
) -> Result<SalaryCalculationResult, CalculationError> {
    let input = SalaryInput::new(gross_annual, year_key)
        .including_super(including_super)
        .with_super_rate_percent(custom_super_rate);
    TakeHomeCalculator::new(registry).calculate(&input)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use crate::calculations::common::round_half_up;
    use crate::{TaxBracket, TaxYearUpdate};

    use super::*;

    fn fixture_registry() -> TaxYearRegistry {
        let mut registry = TaxYearRegistry::new();
        registry
            .add(
                "2030-31",
                TaxYear {
                    year: "2030-31".to_string(),
                    brackets: vec![
                        TaxBracket::new(dec!(0), Some(dec!(20000)), dec!(0), dec!(0)),
                        TaxBracket::new(dec!(20000), None, dec!(0), dec!(0.25)),
                    ],
                    medicare_levy: dec!(0.01),
                    super_rate: dec!(0.10),
                },
            )
            .unwrap();
        registry
    }

    // =========================================================================
    // resolve_year tests
    // =========================================================================

    #[test]
    fn calculate_unknown_year_fails() {
        let registry = TaxYearRegistry::with_builtin_years();
        let calculator = TakeHomeCalculator::new(&registry);

        let result = calculator.calculate(&SalaryInput::new(dec!(100000), "2019-20"));

        assert_eq!(
            result,
            Err(CalculationError::UnknownTaxYear("2019-20".to_string()))
        );
    }

    // =========================================================================
    // effective_super_rate tests
    // =========================================================================

    #[test]
    fn effective_super_rate_defaults_to_year() {
        let registry = fixture_registry();
        let calculator = TakeHomeCalculator::new(&registry);
        let year = registry.get("2030-31").unwrap();

        assert_eq!(calculator.effective_super_rate(year, None), dec!(0.10));
    }

    #[test]
    fn effective_super_rate_uses_custom_percent() {
        let registry = fixture_registry();
        let calculator = TakeHomeCalculator::new(&registry);
        let year = registry.get("2030-31").unwrap();

        assert_eq!(
            calculator.effective_super_rate(year, Some(dec!(15))),
            dec!(0.15)
        );
    }

    #[test]
    fn effective_super_rate_custom_zero_is_honoured() {
        let registry = fixture_registry();
        let calculator = TakeHomeCalculator::new(&registry);
        let year = registry.get("2030-31").unwrap();

        assert_eq!(calculator.effective_super_rate(year, Some(dec!(0))), dec!(0));
    }

    // =========================================================================
    // decompose tests
    // =========================================================================

    #[test]
    fn decompose_adds_super_on_top() {
        let registry = fixture_registry();
        let calculator = TakeHomeCalculator::new(&registry);

        let result = calculator.decompose(dec!(80000), dec!(0.10), false);

        assert_eq!(result.gross, dec!(80000));
        assert_eq!(result.superannuation, dec!(8000));
    }

    #[test]
    fn decompose_backs_super_out_of_package() {
        let registry = fixture_registry();
        let calculator = TakeHomeCalculator::new(&registry);

        let result = calculator.decompose(dec!(110000), dec!(0.10), true);

        assert_eq!(result.gross, dec!(100000));
        assert_eq!(result.superannuation, dec!(10000));
    }

    #[test]
    fn decompose_package_parts_sum_to_input() {
        let registry = fixture_registry();
        let calculator = TakeHomeCalculator::new(&registry);

        let result = calculator.decompose(dec!(100000), dec!(0.115), true);

        assert_eq!(result.gross + result.superannuation, dec!(100000));
    }

    // =========================================================================
    // medicare_levy tests
    // =========================================================================

    #[test]
    fn medicare_levy_is_proportional_with_no_threshold() {
        let registry = fixture_registry();
        let calculator = TakeHomeCalculator::new(&registry);

        assert_eq!(calculator.medicare_levy(dec!(10000), dec!(0.02)), dec!(200));
    }

    // =========================================================================
    // net_figures tests
    // =========================================================================

    #[test]
    fn net_figures_splits_over_periods() {
        let registry = fixture_registry();
        let calculator = TakeHomeCalculator::new(&registry);

        let net = calculator.net_figures(dec!(100000), dec!(20794), dec!(2000));

        assert_eq!(net.annual, dec!(77206));
        assert_eq!(round_half_up(net.monthly), dec!(6433.83));
        assert_eq!(round_half_up(net.fortnightly), dec!(2969.46));
    }

    // =========================================================================
    // calculate (integration) tests
    // =========================================================================

    #[test]
    fn calculate_against_fixture_schedule() {
        let registry = fixture_registry();
        let calculator = TakeHomeCalculator::new(&registry);

        let result = calculator
            .calculate(&SalaryInput::new(dec!(60000), "2030-31"))
            .unwrap();

        // Tax: (60000 - 20000) * 0.25 = 10000
        assert_eq!(result.tax, dec!(10000));
        assert_eq!(result.medicare_levy, dec!(600));
        assert_eq!(result.net_annual, dec!(49400));
        assert_eq!(result.superannuation, dec!(6000));
    }

    #[test]
    fn calculate_below_tax_free_threshold_pays_only_levy() {
        let registry = fixture_registry();
        let calculator = TakeHomeCalculator::new(&registry);

        let result = calculator
            .calculate(&SalaryInput::new(dec!(15000), "2030-31"))
            .unwrap();

        assert_eq!(result.tax, dec!(0));
        assert_eq!(result.medicare_levy, dec!(150));
        assert_eq!(result.net_annual, dec!(14850));
    }

    #[test]
    fn calculate_including_super_taxes_backed_out_gross() {
        let registry = fixture_registry();
        let calculator = TakeHomeCalculator::new(&registry);

        let result = calculator
            .calculate(&SalaryInput::new(dec!(66000), "2030-31").including_super(true))
            .unwrap();

        // Gross: 66000 / 1.10 = 60000
        assert_eq!(result.gross_annual, dec!(60000));
        assert_eq!(result.superannuation, dec!(6000));
        assert_eq!(result.tax, dec!(10000));
    }

    #[test]
    fn calculate_reads_registry_as_updated() {
        let mut registry = fixture_registry();
        registry
            .update(
                "2030-31",
                TaxYearUpdate {
                    medicare_levy: Some(dec!(0.02)),
                    ..Default::default()
                },
            )
            .unwrap();
        let calculator = TakeHomeCalculator::new(&registry);

        let result = calculator
            .calculate(&SalaryInput::new(dec!(60000), "2030-31"))
            .unwrap();

        assert_eq!(result.medicare_levy, dec!(1200));
    }

    #[test]
    fn calculate_take_home_salary_matches_calculator() {
        let registry = fixture_registry();

        let via_fn =
            calculate_take_home_salary(&registry, dec!(60000), "2030-31", true, Some(dec!(12)))
                .unwrap();
        let via_struct = TakeHomeCalculator::new(&registry)
            .calculate(
                &SalaryInput::new(dec!(60000), "2030-31")
                    .including_super(true)
                    .with_super_rate_percent(Some(dec!(12))),
            )
            .unwrap();

        assert_eq!(via_fn, via_struct);
    }
}
