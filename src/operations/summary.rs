use crate::models::budget::BudgetCategory;
use crate::models::snapshot::Snapshot;
use crate::operations::panel::CategoryPanel;
use crate::operations::totals::BudgetSummary;
use rust_decimal::Decimal;
use std::fmt::Write;

pub fn format_money(amount: Decimal) -> String {
    if amount.fract().is_zero() {
        format!("${}", amount.normalize())
    } else {
        format!("${:.2}", amount)
    }
}

pub fn format_budget(categories: &[BudgetCategory], summary: &BudgetSummary) -> String {
    let mut out = String::new();

    for category in categories {
        let panel = CategoryPanel::new(category);
        let _ = writeln!(
            out,
            "{}  (planned {}, actual {})",
            panel.name(),
            format_money(panel.planned_subtotal()),
            format_money(panel.actual_subtotal())
        );
        for line in panel.lines() {
            let planned = if line.shows_planned() {
                format!("  planned {}", format_money(line.item.planned_amount))
            } else {
                String::new()
            };
            let _ = writeln!(
                out,
                "  {:<24} {:>10}{}  [{}]",
                line.item.name,
                format_money(line.item.amount()),
                planned,
                line.status_label()
            );
        }
        let _ = writeln!(out, "  {:<24} {:>10}", "Subtotal", format_money(panel.actual_subtotal()));
        out.push('\n');
    }

    let _ = writeln!(out, "Fixed expenses:    {}", format_money(summary.totals.fixed));
    let _ = writeln!(out, "Variable expenses: {}", format_money(summary.totals.variable));
    let _ = writeln!(out, "Total:             {}", format_money(summary.totals.grand));
    let _ = writeln!(
        out,
        "Monthly income:    {} ({})",
        format_money(summary.income),
        summary.comparison
    );
    out
}

pub fn format_snapshot_list(snapshots: &[&Snapshot]) -> String {
    if snapshots.is_empty() {
        return "No saved budgets.\n".to_string();
    }
    let mut out = String::new();
    for snapshot in snapshots {
        let total = snapshot
            .data
            .iter()
            .map(|c| CategoryPanel::new(c).actual_subtotal())
            .fold(Decimal::ZERO, |acc, v| acc + v);
        let _ = writeln!(
            out,
            "{:<24} {}  total {}",
            snapshot.name,
            snapshot.timestamp.format("%Y-%m-%d %H:%M"),
            format_money(total)
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::budget::BudgetItem;
    use chrono::{TimeZone, Utc};

    fn budget() -> Vec<BudgetCategory> {
        let mut fuel = BudgetItem::new("f".to_string(), "Fuel".to_string(), Decimal::from(150), false);
        fuel.planned_amount = Decimal::from(200);
        vec![BudgetCategory::new(
            "t".to_string(),
            "Transportation".to_string(),
            vec![
                BudgetItem::new("c".to_string(), "Car Payment".to_string(), Decimal::from(300), true),
                fuel,
            ],
        )]
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(Decimal::from(1500)), "$1500");
        assert_eq!(format_money(Decimal::new(150, 1)), "$15");
        assert_eq!(format_money(Decimal::new(17555, 2)), "$175.55");
    }

    #[test]
    fn test_format_budget_lists_items_and_totals() {
        let categories = budget();
        let summary = BudgetSummary::new(&categories, Decimal::from(400));
        let text = format_budget(&categories, &summary);

        assert!(text.contains("Transportation  (planned $500, actual $450)"));
        assert!(text.contains("Car Payment"));
        assert!(text.contains("[Fixed]"));
        assert!(text.contains("planned $200"));
        assert!(text.contains("Fixed expenses:    $300"));
        assert!(text.contains("Variable expenses: $150"));
        assert!(text.contains("over budget by 50"));
    }

    #[test]
    fn test_format_snapshot_list() {
        assert_eq!(format_snapshot_list(&[]), "No saved budgets.\n");

        let snapshot = Snapshot {
            name: "January".to_string(),
            timestamp: Utc.with_ymd_and_hms(2025, 1, 31, 18, 30, 0).unwrap(),
            data: budget(),
        };
        let text = format_snapshot_list(&[&snapshot]);
        assert!(text.contains("January"));
        assert!(text.contains("2025-01-31 18:30"));
        assert!(text.contains("total $450"));
    }
}
