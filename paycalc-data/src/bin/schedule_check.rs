use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use paycalc_core::TaxYearRegistry;
use paycalc_core::calculations::common::round_half_up;
use paycalc_data::{LoadMode, ScheduleLoader};
use rust_decimal::Decimal;

/// Validate a tax year schedule CSV file.
///
/// The CSV file should have the following columns:
/// - year: Financial year key (e.g., 2024-25)
/// - min: Lower threshold of the bracket ("over $X")
/// - max: Upper threshold (empty for the top bracket)
/// - base_amount: Tax payable at the lower threshold
/// - rate: Marginal rate as a decimal (e.g., 0.30)
/// - medicare_levy: Year's levy rate, same on every row (blank keeps the
///   built-in value with --against-builtin)
/// - super_rate: Year's super guarantee rate, same on every row (blank as above)
#[derive(Parser, Debug)]
#[command(name = "paycalc-schedule-check")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the CSV file containing schedule data
    #[arg(short, long)]
    file: PathBuf,

    /// Check the file as an update on top of the built-in years
    #[arg(long, default_value_t = false)]
    against_builtin: bool,
}

fn as_percent(rate: Decimal) -> Decimal {
    round_half_up(rate * Decimal::ONE_HUNDRED).normalize()
}

fn describe_rate(rate: Option<Decimal>) -> String {
    rate.map(|r| format!("{}%", as_percent(r)))
        .unwrap_or_else(|| "unchanged".to_string())
}

fn main() -> Result<()> {
    let args = Args::parse();

    println!("Checking schedules in: {}", args.file.display());

    let file = File::open(&args.file)
        .with_context(|| format!("Failed to open: {}", args.file.display()))?;

    let records = ScheduleLoader::parse(file)
        .with_context(|| format!("Failed to parse CSV: {}", args.file.display()))?;
    println!("Parsed {} rows from CSV", records.len());

    let years = ScheduleLoader::group(&records).context("Failed to group rows by year")?;

    for year in &years {
        let top_rate = year.top_bracket().map(|b| b.rate).unwrap_or_default();
        println!(
            "  {}: {} brackets, top rate {}%, levy {}, super {}",
            year.year,
            year.brackets.len(),
            as_percent(top_rate),
            describe_rate(year.medicare_levy),
            describe_rate(year.super_rate),
        );
    }

    let mut registry = if args.against_builtin {
        TaxYearRegistry::with_builtin_years()
    } else {
        TaxYearRegistry::new()
    };
    let mode = if args.against_builtin {
        LoadMode::Upsert
    } else {
        LoadMode::AddOnly
    };
    let summary = ScheduleLoader::apply(&mut registry, years, mode)
        .context("Schedule check failed")?;

    println!("All {} schedules are valid.", summary.total());

    Ok(())
}
