use crate::models::budget::BudgetCategory;
use crate::operations::panel::CategoryPanel;
use rust_decimal::Decimal;
use std::cmp::Ordering;
use std::fmt;

pub const DEFAULT_MONTHLY_INCOME: i64 = 2700;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BudgetTotals {
    pub fixed: Decimal,
    pub variable: Decimal,
    pub grand: Decimal,
    pub planned: Decimal,
}

impl BudgetTotals {
    pub fn compute(categories: &[BudgetCategory]) -> Self {
        let mut totals = BudgetTotals::default();
        for panel in categories.iter().map(CategoryPanel::new) {
            totals.fixed += panel.fixed_subtotal();
            totals.variable += panel.variable_subtotal();
            totals.planned += panel.planned_subtotal();
        }
        totals.grand = totals.fixed + totals.variable;
        totals
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncomeComparison {
    OverBudget(Decimal),
    UnderBudget(Decimal),
    OnBudget,
}

impl IncomeComparison {
    pub fn new(spend: Decimal, income: Decimal) -> Self {
        match spend.cmp(&income) {
            Ordering::Greater => IncomeComparison::OverBudget(spend - income),
            Ordering::Less => IncomeComparison::UnderBudget(income - spend),
            Ordering::Equal => IncomeComparison::OnBudget,
        }
    }

    pub fn is_over(&self) -> bool {
        matches!(self, IncomeComparison::OverBudget(_))
    }
}

impl fmt::Display for IncomeComparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IncomeComparison::OverBudget(d) => write!(f, "over budget by {}", d.normalize()),
            IncomeComparison::UnderBudget(d) => write!(f, "under budget by {}", d.normalize()),
            IncomeComparison::OnBudget => write!(f, "on budget"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BudgetSummary {
    pub totals: BudgetTotals,
    pub income: Decimal,
    pub comparison: IncomeComparison,
}

impl BudgetSummary {
    pub fn new(categories: &[BudgetCategory], income: Decimal) -> Self {
        let totals = BudgetTotals::compute(categories);
        Self {
            totals,
            income,
            comparison: IncomeComparison::new(totals.grand, income),
        }
    }
}
