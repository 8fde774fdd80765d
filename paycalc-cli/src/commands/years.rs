//! `paycalc years` - list known financial years and their schedules.

use clap::Subcommand;
use paycalc_core::{TaxBracket, TaxYear, TaxYearRegistry};
use tabled::Tabled;

use super::render_table;
use crate::app::App;
use crate::format::{format_aud, format_rate};
use crate::input::parse_year_key;

#[derive(Subcommand, Debug)]
pub enum YearsCommand {
    /// List every known financial year
    List {
        /// Output as JSON instead of a formatted table
        #[arg(long)]
        json: bool,
    },

    /// Show the tax brackets for one financial year
    Show {
        /// Financial year, e.g. 2024-25
        #[arg(value_parser = parse_year_key)]
        year: String,

        /// Output as JSON instead of a formatted table
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Clone, Tabled)]
pub struct YearRow {
    #[tabled(rename = "Year")]
    pub year: String,

    #[tabled(rename = "Brackets")]
    pub brackets: usize,

    #[tabled(rename = "Tax-free Threshold")]
    pub tax_free_threshold: String,

    #[tabled(rename = "Top Rate")]
    pub top_rate: String,

    #[tabled(rename = "Medicare Levy")]
    pub medicare_levy: String,

    #[tabled(rename = "Super Rate")]
    pub super_rate: String,
}

impl From<&TaxYear> for YearRow {
    fn from(year: &TaxYear) -> Self {
        // The tax-free threshold is the top of the first bracket when it
        // carries a zero rate.
        let tax_free_threshold = year
            .brackets
            .first()
            .filter(|b| b.rate.is_zero())
            .and_then(|b| b.max)
            .map(format_aud)
            .unwrap_or_else(|| "-".to_string());

        Self {
            year: year.year.clone(),
            brackets: year.brackets.len(),
            tax_free_threshold,
            top_rate: year
                .top_bracket()
                .map(|b| format_rate(b.rate))
                .unwrap_or_else(|| "-".to_string()),
            medicare_levy: format_rate(year.medicare_levy),
            super_rate: format_rate(year.super_rate),
        }
    }
}

#[derive(Debug, Clone, Tabled)]
pub struct BracketRow {
    #[tabled(rename = "Over")]
    pub over: String,

    #[tabled(rename = "Up To")]
    pub up_to: String,

    #[tabled(rename = "Base Tax")]
    pub base_amount: String,

    #[tabled(rename = "Rate")]
    pub rate: String,
}

impl From<&TaxBracket> for BracketRow {
    fn from(bracket: &TaxBracket) -> Self {
        Self {
            over: format_aud(bracket.min),
            up_to: bracket
                .max
                .map(format_aud)
                .unwrap_or_else(|| "no limit".to_string()),
            base_amount: format_aud(bracket.base_amount),
            rate: format_rate(bracket.rate),
        }
    }
}

impl YearsCommand {
    pub fn exec(
        &self,
        app: &App,
    ) -> anyhow::Result<()> {
        match self {
            YearsCommand::List { json: true } => {
                let years: Vec<&TaxYear> = app.registry.iter().collect();
                println!("{}", serde_json::to_string_pretty(&years)?);
            }
            YearsCommand::List { json: false } => {
                println!("{}", render_year_list(&app.registry));
            }
            YearsCommand::Show { year, json } => {
                let tax_year = app.registry.require(year)?;
                if *json {
                    println!("{}", serde_json::to_string_pretty(tax_year)?);
                } else {
                    println!("{}", render_year(tax_year));
                }
            }
        }
        Ok(())
    }
}

pub fn render_year_list(registry: &TaxYearRegistry) -> String {
    if registry.is_empty() {
        return "No tax years registered".to_string();
    }
    let rows: Vec<YearRow> = registry.iter().map(YearRow::from).collect();
    render_table(&rows)
}

pub fn render_year(year: &TaxYear) -> String {
    let rows: Vec<BracketRow> = year.brackets.iter().map(BracketRow::from).collect();
    format!(
        "Tax brackets for {} (Medicare levy {}, super {})\n{}",
        year.year,
        format_rate(year.medicare_levy),
        format_rate(year.super_rate),
        render_table(&rows)
    )
}
