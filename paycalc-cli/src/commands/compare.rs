//! `paycalc compare` - take-home and contract figures across salaries.

use clap::Args;
use paycalc_core::calculations::contract::calculate_contract_rate;
use paycalc_core::{
    ContractCalculationResult, SalaryCalculationResult, SalaryInput, TakeHomeCalculator,
};
use rust_decimal::Decimal;
use tabled::Tabled;
use tracing::warn;

use super::render_table;
use crate::app::App;
use crate::format::{format_aud, format_percent};
use crate::input::{parse_amount, parse_rate_percent, parse_uplift_percent, parse_year_key};

/// Scenarios shown when no salaries are given.
pub const DEFAULT_SALARIES: [&str; 5] = ["80000", "90000", "100000", "110000", "120000"];

const MISSING: &str = "-";

#[derive(Args, Debug)]
pub struct CompareCommand {
    /// Salaries to compare [default: 80000 90000 100000 110000 120000]
    #[arg(allow_hyphen_values = true)]
    salaries: Vec<String>,

    /// Financial year, e.g. 2024-25
    #[arg(short, long, value_parser = parse_year_key)]
    year: Option<String>,

    /// Treat each salary as a package that already includes super
    #[arg(long)]
    including_super: bool,

    /// Custom super rate in percent, replacing the year's rate
    #[arg(long, value_parser = parse_rate_percent)]
    super_rate: Option<Decimal>,

    /// Contract uplift in percent
    #[arg(short, long, value_parser = parse_uplift_percent, allow_hyphen_values = true)]
    uplift: Option<Decimal>,
}

/// Row for the comparison table output
#[derive(Debug, Clone, PartialEq, Eq, Tabled)]
pub struct CompareRow {
    #[tabled(rename = "Salary")]
    pub salary: String,

    #[tabled(rename = "Tax")]
    pub tax: String,

    #[tabled(rename = "Medicare")]
    pub medicare_levy: String,

    #[tabled(rename = "Net Annual")]
    pub net_annual: String,

    #[tabled(rename = "Net Monthly")]
    pub net_monthly: String,

    #[tabled(rename = "Net Fortnightly")]
    pub net_fortnightly: String,

    #[tabled(rename = "Super")]
    pub superannuation: String,

    #[tabled(rename = "Contract Annual")]
    pub contract_annual: String,

    #[tabled(rename = "Contract Daily")]
    pub contract_daily: String,
}

impl CompareRow {
    fn from_results(
        salary: &str,
        take_home: &SalaryCalculationResult,
        contract: &ContractCalculationResult,
    ) -> Self {
        Self {
            salary: salary.to_string(),
            tax: format_aud(take_home.tax),
            medicare_levy: format_aud(take_home.medicare_levy),
            net_annual: format_aud(take_home.net_annual),
            net_monthly: format_aud(take_home.net_monthly),
            net_fortnightly: format_aud(take_home.net_fortnightly),
            superannuation: format_aud(take_home.superannuation),
            contract_annual: format_aud(contract.contract_annual.selected),
            contract_daily: format_aud(contract.contract_daily),
        }
    }

    /// A scenario that could not be calculated: every figure shows "-".
    fn unavailable(salary: &str) -> Self {
        Self {
            salary: salary.to_string(),
            tax: MISSING.to_string(),
            medicare_levy: MISSING.to_string(),
            net_annual: MISSING.to_string(),
            net_monthly: MISSING.to_string(),
            net_fortnightly: MISSING.to_string(),
            superannuation: MISSING.to_string(),
            contract_annual: MISSING.to_string(),
            contract_daily: MISSING.to_string(),
        }
    }
}

/// Resolved options for one comparison run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompareOptions {
    pub year: String,
    pub including_super: bool,
    pub super_rate_percent: Option<Decimal>,
    pub uplift: Decimal,
}

impl CompareCommand {
    pub fn exec(
        &self,
        app: &App,
    ) -> anyhow::Result<()> {
        let options = CompareOptions {
            year: app.settings.year(self.year.as_deref()),
            including_super: app.settings.including_super(self.including_super),
            super_rate_percent: app.settings.super_rate_percent(self.super_rate),
            uplift: app.settings.uplift_percentage(self.uplift),
        };
        let salaries: Vec<&str> = if self.salaries.is_empty() {
            DEFAULT_SALARIES.to_vec()
        } else {
            self.salaries.iter().map(String::as_str).collect()
        };

        let rows = build_rows(app, &salaries, &options);
        println!(
            "Salary comparison for {} (contract uplift {})",
            options.year,
            format_percent(options.uplift)
        );
        println!("{}", render_table(&rows));
        Ok(())
    }
}

/// One row per salary, in the order given. A salary that fails to parse or
/// calculate becomes a row of "-" instead of stopping the table.
pub fn build_rows(
    app: &App,
    salaries: &[&str],
    options: &CompareOptions,
) -> Vec<CompareRow> {
    let calculator = TakeHomeCalculator::new(&app.registry);

    salaries
        .iter()
        .map(|salary| {
            let row = parse_amount(salary)
                .map_err(anyhow::Error::from)
                .and_then(|amount| {
                    let input = SalaryInput::new(amount, options.year.as_str())
                        .including_super(options.including_super)
                        .with_super_rate_percent(options.super_rate_percent);
                    let take_home = calculator.calculate(&input)?;
                    let contract = calculate_contract_rate(amount, Some(options.uplift));
                    Ok(CompareRow::from_results(
                        &format_aud(amount),
                        &take_home,
                        &contract,
                    ))
                });

            row.unwrap_or_else(|error| {
                warn!(salary = %salary, %error, "skipping comparison scenario");
                CompareRow::unavailable(salary)
            })
        })
        .collect()
}
