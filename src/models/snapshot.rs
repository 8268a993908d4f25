use crate::models::budget::BudgetCategory;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub name: String,
    pub timestamp: DateTime<Utc>,
    pub data: Vec<BudgetCategory>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SavedBudgets {
    #[serde(rename = "savedBudgets", default)]
    pub saved_budgets: BTreeMap<String, Snapshot>,
}
