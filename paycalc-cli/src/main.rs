use std::path::PathBuf;

use clap::{ArgAction, Parser};
use tracing::debug;

use paycalc_cli::app::App;
use paycalc_cli::commands::Command;
use paycalc_cli::logging;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Australian take-home pay and contractor rate calculator.
///
/// Loads the built-in financial years 2022-23 to 2025-26, applies any extra
/// schedule files, and runs the requested calculation.
#[derive(Debug, Parser)]
#[command(name = "paycalc", version, about)]
struct Cli {
    /// TOML settings file.
    #[arg(long, global = true, env = "PAYCALC_CONFIG")]
    config: Option<PathBuf>,

    /// Schedule CSV to merge into the known years. May be repeated.
    #[arg(long = "schedules", global = true, value_name = "CSV")]
    schedules: Vec<PathBuf>,

    /// More log output on stderr (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Also append log records to this file.
    #[arg(long, global = true, env = "PAYCALC_LOG_FILE")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logging::init_logging(cli.verbose, cli.log_file.as_deref())?;

    let app = App::load(cli.config.as_deref(), &cli.schedules)?;
    debug!(years = ?app.registry.year_keys(), "registry ready");

    cli.command.exec(&app)
}
