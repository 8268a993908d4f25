mod config;
mod db;
mod errors;
mod logging;
mod models;
mod operations;

use clap::Parser;
use config::{Cli, Command, SnapshotCommand};
use db::budget_repository::SqliteBudgetStore;
use db::connection::establish_connection;
use operations::dashboard::run_dashboard;
use operations::editor::ItemEditor;
use operations::notify::ToastLog;
use operations::snapshot::SnapshotStore;
use operations::summary::{format_budget, format_snapshot_list};
use operations::tracker::BudgetTracker;
use std::process::ExitCode;

type Tracker = BudgetTracker<SqliteBudgetStore, ToastLog>;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = logging::init_logging(&cli.log_file) {
        eprintln!("{}", e);
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), String> {
    let conn = establish_connection(&cli.db)
        .map_err(|e| format!("Failed to open database '{}': {}", cli.db, e))?;
    let snapshots = SnapshotStore::open(&cli.snapshots).map_err(|e| e.to_string())?;
    let mut tracker = BudgetTracker::new(SqliteBudgetStore::new(conn, cli.user), ToastLog::default())
        .with_income(cli.income)
        .with_snapshots(snapshots);

    match cli.command.unwrap_or(Command::Dashboard) {
        Command::Dashboard => run_dashboard(&mut tracker),
        Command::Summary => {
            tracker.load().map_err(|e| e.to_string())?;
            print!("{}", format_budget(tracker.categories(), &tracker.summary()));
            Ok(())
        }
        Command::Set { category, item, amount } => set_amount(&mut tracker, &category, &item, &amount),
        Command::ToggleFixed { category, item } => {
            tracker.load().map_err(|e| e.to_string())?;
            let (category_id, item_id) = find_item(&tracker, &category, &item)?;
            tracker
                .toggle_fixed(&category_id, &item_id)
                .map_err(|e| e.to_string())?;
            print_latest(&tracker);
            Ok(())
        }
        Command::Snapshot(SnapshotCommand::Save { name }) => {
            tracker.load().map_err(|e| e.to_string())?;
            tracker.save_snapshot(&name).map_err(|e| e.to_string())?;
            print_latest(&tracker);
            Ok(())
        }
        Command::Snapshot(SnapshotCommand::List) => {
            print!("{}", format_snapshot_list(&tracker.snapshots()));
            Ok(())
        }
        Command::Snapshot(SnapshotCommand::Show { name }) => {
            tracker.select_snapshot(&name).map_err(|e| e.to_string())?;
            print!("{}", format_budget(tracker.categories(), &tracker.summary()));
            Ok(())
        }
    }
}

fn set_amount(tracker: &mut Tracker, category: &str, item: &str, amount: &str) -> Result<(), String> {
    tracker.load().map_err(|e| e.to_string())?;
    let (category_id, item_id) = find_item(tracker, category, item)?;

    let requested = match tracker.item(&category_id, &item_id) {
        Some(budget_item) => ItemEditor::new(budget_item)
            .parse_entry(amount)
            .map_err(|e| e.to_string())?,
        None => None,
    };

    match requested {
        Some(new_amount) => {
            tracker
                .update_item_amount(&category_id, &item_id, new_amount)
                .map_err(|e| e.to_string())?;
            print_latest(tracker);
            Ok(())
        }
        None => {
            println!("'{}' is a fixed item; amount unchanged", item);
            Ok(())
        }
    }
}

fn find_item(tracker: &Tracker, category: &str, item: &str) -> Result<(String, String), String> {
    tracker
        .find_by_name(category, item)
        .ok_or_else(|| format!("No item '{}' in category '{}'", item, category))
}

fn print_latest(tracker: &Tracker) {
    if let Some(notification) = tracker.notifier().latest() {
        println!("{}: {}", notification.title, notification.description);
    }
}
