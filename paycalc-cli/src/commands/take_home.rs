//! `paycalc take-home` - salary breakdown for one financial year.

use clap::Args;
use paycalc_core::calculations::progressive::marginal_rate;
use paycalc_core::{SalaryCalculationResult, SalaryInput, TakeHomeCalculator};
use rust_decimal::Decimal;
use serde::Serialize;

use super::{LineItem, render_table};
use crate::app::App;
use crate::format::{format_aud, format_rate};
use crate::input::{parse_amount, parse_rate_percent, parse_year_key};

#[derive(Args, Debug)]
pub struct TakeHomeCommand {
    /// Annual salary, or the total package with --including-super (e.g. 100000 or '$100,000')
    #[arg(value_parser = parse_amount, allow_hyphen_values = true)]
    salary: Decimal,

    /// Financial year, e.g. 2024-25
    #[arg(short, long, value_parser = parse_year_key)]
    year: Option<String>,

    /// Treat the salary as a package that already includes super
    #[arg(long)]
    including_super: bool,

    /// Custom super rate in percent, replacing the year's rate
    #[arg(long, value_parser = parse_rate_percent)]
    super_rate: Option<Decimal>,

    /// Output as JSON instead of a formatted table
    #[arg(long)]
    json: bool,
}

/// Take-home figures as emitted with `--json`. Amounts are unrounded.
#[derive(Debug, Serialize)]
pub struct TakeHomeReport {
    pub year: String,
    #[serde(flatten)]
    pub result: SalaryCalculationResult,
    pub marginal_rate: Option<Decimal>,
}

impl TakeHomeCommand {
    pub fn exec(
        &self,
        app: &App,
    ) -> anyhow::Result<()> {
        let input = SalaryInput::new(self.salary, app.settings.year(self.year.as_deref()))
            .including_super(app.settings.including_super(self.including_super))
            .with_super_rate_percent(app.settings.super_rate_percent(self.super_rate));

        let report = take_home_report(app, &input)?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            println!("{}", render_take_home(&report));
        }
        Ok(())
    }
}

pub fn take_home_report(
    app: &App,
    input: &SalaryInput,
) -> anyhow::Result<TakeHomeReport> {
    let result = TakeHomeCalculator::new(&app.registry).calculate(input)?;
    let tax_year = app.registry.require(&input.year)?;

    Ok(TakeHomeReport {
        year: input.year.clone(),
        marginal_rate: marginal_rate(result.gross_annual, &tax_year.brackets),
        result,
    })
}

pub fn render_take_home(report: &TakeHomeReport) -> String {
    let r = &report.result;
    let rows = [
        LineItem::new("Gross salary", format_aud(r.gross_annual)),
        LineItem::new("Income tax", format_aud(r.tax)),
        LineItem::new("Medicare levy", format_aud(r.medicare_levy)),
        LineItem::new("Net annual", format_aud(r.net_annual)),
        LineItem::new("Net monthly", format_aud(r.net_monthly)),
        LineItem::new("Net fortnightly", format_aud(r.net_fortnightly)),
        LineItem::new("Superannuation", format_aud(r.superannuation)),
        LineItem::new("Total package", format_aud(r.total_package())),
    ];

    let marginal = report
        .marginal_rate
        .map(format_rate)
        .unwrap_or_else(|| "-".to_string());

    format!(
        "Take-home pay for {}\n{}\nMarginal tax rate: {}",
        report.year,
        render_table(&rows),
        marginal
    )
}
