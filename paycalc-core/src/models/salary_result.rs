use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Request for a take-home calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryInput {
    /// Annual salary, or the total package when `including_super` is set.
    pub gross: Decimal,
    pub year: String,
    pub including_super: bool,
    /// Overrides the year's super rate. Expressed in percent, e.g. `12` for 12%.
    pub custom_super_rate_percent: Option<Decimal>,
}

impl SalaryInput {
    pub fn new(
        gross: Decimal,
        year: impl Into<String>,
    ) -> Self {
        Self {
            gross,
            year: year.into(),
            including_super: false,
            custom_super_rate_percent: None,
        }
    }

    pub fn including_super(
        mut self,
        including_super: bool,
    ) -> Self {
        self.including_super = including_super;
        self
    }

    pub fn with_super_rate_percent(
        mut self,
        percent: Option<Decimal>,
    ) -> Self {
        self.custom_super_rate_percent = percent;
        self
    }
}

/// Breakdown of a salary into tax, levy, super and periodic net pay.
///
/// Values are unrounded; formatting to cents is left to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryCalculationResult {
    /// Gross salary after any super has been backed out of a package.
    pub gross_annual: Decimal,
    pub tax: Decimal,
    pub medicare_levy: Decimal,
    pub net_annual: Decimal,
    pub net_monthly: Decimal,
    pub net_fortnightly: Decimal,
    pub superannuation: Decimal,
}

impl SalaryCalculationResult {
    /// Income tax plus Medicare levy.
    pub fn total_deductions(&self) -> Decimal {
        self.tax + self.medicare_levy
    }

    /// Gross plus super, i.e. the employer's total cost.
    pub fn total_package(&self) -> Decimal {
        self.gross_annual + self.superannuation
    }
}
