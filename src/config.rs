use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use std::path::PathBuf;

/// Personal budget tracker.
#[derive(Parser, Debug)]
#[command(name = "budgt", version, about)]
pub struct Cli {
    /// SQLite database holding categories and items
    #[arg(long, env = "BUDGET_DB", default_value = "budget_tracker.db", global = true)]
    pub db: String,

    /// JSON file with saved budget snapshots
    #[arg(long, env = "BUDGET_SNAPSHOTS", default_value = "saved_budgets.json", global = true)]
    pub snapshots: PathBuf,

    /// Signed-in user; without one the budget cannot be loaded
    #[arg(long, env = "BUDGET_USER", global = true)]
    pub user: Option<String>,

    /// Monthly income the total is compared against
    #[arg(long, env = "BUDGET_INCOME", default_value = "2700", global = true)]
    pub income: Decimal,

    #[arg(long, env = "BUDGET_LOG_FILE", default_value = "budget_tracker.log", global = true)]
    pub log_file: PathBuf,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// Interactive terminal dashboard (default)
    Dashboard,
    /// Print categories, subtotals and totals
    Summary,
    /// Set the actual amount of an item
    Set {
        category: String,
        item: String,
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },
    /// Switch an item between fixed and variable
    ToggleFixed { category: String, item: String },
    #[command(subcommand)]
    Snapshot(SnapshotCommand),
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum SnapshotCommand {
    /// Save the current budget under a name
    Save { name: String },
    /// List saved budgets, newest first
    List,
    /// Print a saved budget
    Show { name: String },
}
