pub mod compare;
pub mod contract;
pub mod take_home;
pub mod years;

use clap::Subcommand;
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Columns},
};

use crate::app::App;

pub use compare::CompareCommand;
pub use contract::ContractCommand;
pub use take_home::TakeHomeCommand;
pub use years::YearsCommand;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Take-home pay for an annual salary
    TakeHome(TakeHomeCommand),

    /// Contractor rates equivalent to a permanent salary
    Contract(ContractCommand),

    /// Side-by-side take-home and contract figures for several salaries
    Compare(CompareCommand),

    /// Inspect the known financial years
    #[command(subcommand)]
    Years(YearsCommand),
}

impl Command {
    pub fn exec(
        &self,
        app: &App,
    ) -> anyhow::Result<()> {
        match self {
            Command::TakeHome(cmd) => cmd.exec(app),
            Command::Contract(cmd) => cmd.exec(app),
            Command::Compare(cmd) => cmd.exec(app),
            Command::Years(cmd) => cmd.exec(app),
        }
    }
}

/// Label/amount row for two-column summaries.
#[derive(Debug, Clone, Tabled)]
pub struct LineItem {
    #[tabled(rename = "Item")]
    pub label: &'static str,

    #[tabled(rename = "Amount")]
    pub amount: String,
}

impl LineItem {
    pub fn new(
        label: &'static str,
        amount: impl Into<String>,
    ) -> Self {
        Self {
            label,
            amount: amount.into(),
        }
    }
}

/// Rounded table with every column after the first right-aligned.
pub fn render_table<T: Tabled>(rows: &[T]) -> String {
    Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(1..)).with(Alignment::right()))
        .to_string()
}
