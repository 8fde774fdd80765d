//! `paycalc contract` - contractor rates for a permanent salary.

use clap::Args;
use paycalc_core::ContractCalculationResult;
use paycalc_core::calculations::contract::{
    MAX_UPLIFT, MIN_UPLIFT, WORKING_DAYS_PER_YEAR, calculate_contract_rate,
};
use rust_decimal::Decimal;
use tracing::warn;

use super::{LineItem, render_table};
use crate::app::App;
use crate::format::{format_aud, format_percent};
use crate::input::{parse_amount, parse_uplift_percent};

#[derive(Args, Debug)]
pub struct ContractCommand {
    /// Permanent base salary, excluding super
    #[arg(value_parser = parse_amount, allow_hyphen_values = true)]
    salary: Decimal,

    /// Uplift over the base salary in percent (advised 15-30)
    #[arg(short, long, value_parser = parse_uplift_percent, allow_hyphen_values = true)]
    uplift: Option<Decimal>,

    /// Output as JSON instead of a formatted table
    #[arg(long)]
    json: bool,
}

impl ContractCommand {
    pub fn exec(
        &self,
        app: &App,
    ) -> anyhow::Result<()> {
        let uplift = app.settings.uplift_percentage(self.uplift);
        let result = calculate_contract_rate(self.salary, Some(uplift));

        if !result.uplift_in_advised_range() {
            warn!(
                uplift = %result.uplift_percentage,
                "uplift is outside the advised {}-{}% range",
                MIN_UPLIFT,
                MAX_UPLIFT
            );
        }

        if self.json {
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else {
            println!("{}", render_contract(&result));
        }
        Ok(())
    }
}

pub fn render_contract(result: &ContractCalculationResult) -> String {
    let range = &result.contract_annual;
    let rows = [
        LineItem::new("Base salary", format_aud(result.base_annual_salary)),
        LineItem::new(
            "Advised range",
            format!("{} - {}", format_aud(range.min), format_aud(range.max)),
        ),
        LineItem::new("Contract annual", format_aud(range.selected)),
        LineItem::new("Contract monthly", format_aud(result.contract_monthly)),
        LineItem::new("Contract daily", format_aud(result.contract_daily)),
    ];

    let mut out = format!(
        "Contract rate at {} uplift ({} working days)\n{}",
        format_percent(result.uplift_percentage),
        WORKING_DAYS_PER_YEAR,
        render_table(&rows)
    );
    if !result.uplift_in_advised_range() {
        out.push_str(&format!(
            "\nNote: {} is outside the advised {}-{} range",
            format_percent(result.uplift_percentage),
            format_percent(MIN_UPLIFT),
            format_percent(MAX_UPLIFT)
        ));
    }
    out
}
