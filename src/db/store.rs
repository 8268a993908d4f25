use crate::models::budget::{BudgetCategory, BudgetItem, DefaultCategory};
use rust_decimal::Decimal;

#[derive(Debug, Clone, PartialEq)]
pub struct ItemRecord {
    pub id: String,
    pub name: String,
    pub amount: Decimal,
    pub planned_amount: Option<Decimal>,
    pub actual_amount: Option<Decimal>,
    pub is_fixed: bool,
    pub display_order: Option<i64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryRecord {
    pub id: String,
    pub name: String,
    pub display_order: Option<i64>,
    pub items: Vec<ItemRecord>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewCategory {
    pub user_id: String,
    pub name: String,
    pub display_order: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewItem {
    pub category_id: String,
    pub name: String,
    pub amount: Decimal,
    pub planned_amount: Option<Decimal>,
    pub is_fixed: bool,
    pub display_order: i64,
}

impl From<ItemRecord> for BudgetItem {
    fn from(record: ItemRecord) -> Self {
        let actual_amount = record.actual_amount.unwrap_or(record.amount);
        let mut item = BudgetItem::new(record.id, record.name, actual_amount, record.is_fixed);
        item.planned_amount = record.planned_amount.unwrap_or(actual_amount);
        item.display_order = record.display_order;
        item
    }
}

impl From<CategoryRecord> for BudgetCategory {
    fn from(record: CategoryRecord) -> Self {
        let items = record.items.into_iter().map(BudgetItem::from).collect();
        let mut category = BudgetCategory::new(record.id, record.name, items);
        category.display_order = record.display_order;
        category.sort_items();
        category
    }
}

pub fn default_items(category_id: &str, category: &DefaultCategory) -> Vec<NewItem> {
    category
        .items
        .iter()
        .enumerate()
        .map(|(index, item)| NewItem {
            category_id: category_id.to_string(),
            name: item.name.to_string(),
            amount: Decimal::from(item.amount),
            planned_amount: Some(Decimal::from(item.amount)),
            is_fixed: item.is_fixed,
            display_order: index as i64,
        })
        .collect()
}

pub trait BudgetStore {
    fn current_user(&self) -> Option<String>;

    fn list_categories(&self, user_id: &str) -> Result<Vec<CategoryRecord>, String>;

    fn insert_category(&self, category: &NewCategory) -> Result<String, String>;

    fn insert_items(&self, items: &[NewItem]) -> Result<(), String>;

    fn update_item_amount(&self, item_id: &str, amount: Decimal) -> Result<(), String>;

    fn update_item_fixed(&self, item_id: &str, is_fixed: bool) -> Result<(), String>;

    // Not atomic; two sessions seeding at once can both insert.
    fn seed_defaults(&self, user_id: &str, defaults: &[DefaultCategory]) -> Result<usize, String> {
        for (index, category) in defaults.iter().enumerate() {
            let category_id = self.insert_category(&NewCategory {
                user_id: user_id.to_string(),
                name: category.name.to_string(),
                display_order: index as i64,
            })?;
            self.insert_items(&default_items(&category_id, category))?;
        }
        Ok(defaults.len())
    }
}
