use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetItem {
    pub id: String,
    pub name: String,
    pub planned_amount: Decimal,
    pub actual_amount: Decimal,
    pub is_fixed: bool,
    pub display_order: Option<i64>,
}

impl BudgetItem {
    pub fn new(id: String, name: String, amount: Decimal, is_fixed: bool) -> Self {
        Self {
            id,
            name,
            planned_amount: amount,
            actual_amount: amount,
            is_fixed,
            display_order: None,
        }
    }

    pub fn amount(&self) -> Decimal {
        self.actual_amount
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetCategory {
    pub id: String,
    pub name: String,
    pub display_order: Option<i64>,
    pub items: Vec<BudgetItem>,
}

impl BudgetCategory {
    pub fn new(id: String, name: String, items: Vec<BudgetItem>) -> Self {
        Self {
            id,
            name,
            display_order: None,
            items,
        }
    }

    pub fn item(&self, item_id: &str) -> Option<&BudgetItem> {
        self.items.iter().find(|item| item.id == item_id)
    }

    pub fn item_mut(&mut self, item_id: &str) -> Option<&mut BudgetItem> {
        self.items.iter_mut().find(|item| item.id == item_id)
    }

    // Stable, so items without an order keep insertion order.
    pub fn sort_items(&mut self) {
        self.items.sort_by_key(|item| item.display_order.unwrap_or(0));
    }
}

#[derive(Debug, Clone, Copy)]
pub struct DefaultItem {
    pub name: &'static str,
    pub amount: i64,
    pub is_fixed: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct DefaultCategory {
    pub name: &'static str,
    pub items: &'static [DefaultItem],
}

pub const DEFAULT_CATEGORIES: &[DefaultCategory] = &[
    DefaultCategory {
        name: "Housing & Utilities",
        items: &[
            DefaultItem {
                name: "Rent/Mortgage",
                amount: 1500,
                is_fixed: true,
            },
            DefaultItem {
                name: "Utilities",
                amount: 200,
                is_fixed: false,
            },
        ],
    },
    DefaultCategory {
        name: "Transportation",
        items: &[
            DefaultItem {
                name: "Car Payment",
                amount: 300,
                is_fixed: true,
            },
            DefaultItem {
                name: "Fuel",
                amount: 150,
                is_fixed: false,
            },
        ],
    },
    DefaultCategory {
        name: "Food & Groceries",
        items: &[
            DefaultItem {
                name: "Groceries",
                amount: 400,
                is_fixed: false,
            },
            DefaultItem {
                name: "Dining Out",
                amount: 200,
                is_fixed: false,
            },
        ],
    },
];
