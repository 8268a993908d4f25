use crate::db::store::{BudgetStore, CategoryRecord, ItemRecord, NewCategory, NewItem, default_items};
use crate::models::budget::DefaultCategory;
use rusqlite::types::Type;
use rusqlite::{Connection, params};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::str::FromStr;
use uuid::Uuid;

pub struct SqliteBudgetStore {
    conn: Connection,
    user_id: Option<String>,
}

impl SqliteBudgetStore {
    pub fn new(conn: Connection, user_id: Option<String>) -> Self {
        Self { conn, user_id }
    }

    fn signed_in_user(&self) -> Result<&str, String> {
        self.user_id
            .as_deref()
            .ok_or_else(|| "Not signed in".to_string())
    }
}

impl BudgetStore for SqliteBudgetStore {
    fn current_user(&self) -> Option<String> {
        self.user_id.clone()
    }

    fn list_categories(&self, user_id: &str) -> Result<Vec<CategoryRecord>, String> {
        list_categories(&self.conn, user_id)
    }

    fn insert_category(&self, category: &NewCategory) -> Result<String, String> {
        insert_category(&self.conn, category)
    }

    fn insert_items(&self, items: &[NewItem]) -> Result<(), String> {
        insert_items(&self.conn, items)
    }

    fn update_item_amount(&self, item_id: &str, amount: Decimal) -> Result<(), String> {
        update_item_amount(&self.conn, self.signed_in_user()?, item_id, &amount)
    }

    fn update_item_fixed(&self, item_id: &str, is_fixed: bool) -> Result<(), String> {
        update_item_fixed(&self.conn, self.signed_in_user()?, item_id, is_fixed)
    }

    fn seed_defaults(&self, user_id: &str, defaults: &[DefaultCategory]) -> Result<usize, String> {
        let tx = self
            .conn
            .unchecked_transaction()
            .map_err(|e| format!("Failed to start transaction: {}", e))?;

        // Another session may have seeded since our last read.
        if count_categories(&tx, user_id)? > 0 {
            return Ok(0);
        }

        for (index, category) in defaults.iter().enumerate() {
            let category_id = insert_category(
                &tx,
                &NewCategory {
                    user_id: user_id.to_string(),
                    name: category.name.to_string(),
                    display_order: index as i64,
                },
            )?;
            insert_items(&tx, &default_items(&category_id, category))?;
        }

        tx.commit()
            .map_err(|e| format!("Failed to commit initial budget: {}", e))?;
        Ok(defaults.len())
    }
}

fn parse_decimal(idx: usize, raw: &str) -> rusqlite::Result<Decimal> {
    Decimal::from_str(raw).map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn parse_optional_decimal(idx: usize, raw: Option<String>) -> rusqlite::Result<Option<Decimal>> {
    raw.map(|value| parse_decimal(idx, &value)).transpose()
}

pub fn count_categories(conn: &Connection, user_id: &str) -> Result<i64, String> {
    conn.query_row(
        "SELECT COUNT(*) FROM budget_categories WHERE user_id = ?1",
        [user_id],
        |row| row.get(0),
    )
    .map_err(|e| format!("Failed to count categories: {}", e))
}

pub fn list_categories(conn: &Connection, user_id: &str) -> Result<Vec<CategoryRecord>, String> {
    let mut items_by_category = list_items(conn, user_id)?;

    let mut stmt = conn
        .prepare(
            "SELECT id, name, display_order FROM budget_categories \n             WHERE user_id = ?1 ORDER BY COALESCE(display_order, 0) ASC, rowid ASC",
        )
        .map_err(|e| format!("Failed to prepare statement: {}", e))?;

    let category_iter = stmt
        .query_map([user_id], |row| {
            Ok(CategoryRecord {
                id: row.get(0)?,
                name: row.get(1)?,
                display_order: row.get(2)?,
                items: Vec::new(),
            })
        })
        .map_err(|e| format!("Failed to query categories: {}", e))?;

    let mut categories = Vec::new();
    for category in category_iter {
        let mut category = category.map_err(|e| format!("Failed to parse category: {}", e))?;
        category.items = items_by_category.remove(&category.id).unwrap_or_default();
        categories.push(category);
    }
    Ok(categories)
}

fn list_items(conn: &Connection, user_id: &str) -> Result<HashMap<String, Vec<ItemRecord>>, String> {
    let mut stmt = conn
        .prepare(
            "SELECT i.id, i.category_id, i.name, i.amount, i.planned_amount, i.actual_amount, i.is_fixed, i.display_order \n             FROM budget_items i JOIN budget_categories c ON c.id = i.category_id \n             WHERE c.user_id = ?1 ORDER BY i.rowid ASC",
        )
        .map_err(|e| format!("Failed to prepare statement: {}", e))?;

    let item_iter = stmt
        .query_map([user_id], |row| {
            let category_id: String = row.get(1)?;
            let amount_str: String = row.get(3)?;
            Ok((
                category_id,
                ItemRecord {
                    id: row.get(0)?,
                    name: row.get(2)?,
                    amount: parse_decimal(3, &amount_str)?,
                    planned_amount: parse_optional_decimal(4, row.get(4)?)?,
                    actual_amount: parse_optional_decimal(5, row.get(5)?)?,
                    is_fixed: row.get(6)?,
                    display_order: row.get(7)?,
                },
            ))
        })
        .map_err(|e| format!("Failed to query budget items: {}", e))?;

    let mut items: HashMap<String, Vec<ItemRecord>> = HashMap::new();
    for item in item_iter {
        let (category_id, item) = item.map_err(|e| format!("Failed to parse budget item: {}", e))?;
        items.entry(category_id).or_default().push(item);
    }
    Ok(items)
}

pub fn insert_category(conn: &Connection, category: &NewCategory) -> Result<String, String> {
    let id = Uuid::new_v4().to_string();
    conn.execute(
        "INSERT INTO budget_categories (id, user_id, name, display_order) VALUES (?1, ?2, ?3, ?4)",
        params![&id, &category.user_id, &category.name, category.display_order],
    )
    .map_err(|e| format!("Failed to insert category: {}", e))?;
    Ok(id)
}

pub fn insert_items(conn: &Connection, items: &[NewItem]) -> Result<(), String> {
    let mut stmt = conn
        .prepare(
            "INSERT INTO budget_items (id, category_id, name, amount, planned_amount, is_fixed, display_order) \n             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        )
        .map_err(|e| format!("Failed to prepare statement: {}", e))?;

    for item in items {
        stmt.execute(params![
            Uuid::new_v4().to_string(),
            &item.category_id,
            &item.name,
            item.amount.to_string(),
            item.planned_amount.map(|p| p.to_string()),
            item.is_fixed,
            item.display_order,
        ])
        .map_err(|e| format!("Failed to insert budget item '{}': {}", item.name, e))?;
    }
    Ok(())
}

// Items are only writable through a category owned by `user_id`.
const OWNED_ITEM: &str = "id = ?2 AND category_id IN (SELECT id FROM budget_categories WHERE user_id = ?3)";

pub fn update_item_amount(conn: &Connection, user_id: &str, item_id: &str, amount: &Decimal) -> Result<(), String> {
    let rows = conn
        .execute(
            &format!("UPDATE budget_items SET actual_amount = ?1 WHERE {}", OWNED_ITEM),
            params![amount.to_string(), item_id, user_id],
        )
        .map_err(|e| format!("Failed to update budget item: {}", e))?;

    if rows == 0 {
        return Err(format!("Budget item with ID {} not found", item_id));
    }
    Ok(())
}

pub fn update_item_fixed(conn: &Connection, user_id: &str, item_id: &str, is_fixed: bool) -> Result<(), String> {
    let rows = conn
        .execute(
            &format!("UPDATE budget_items SET is_fixed = ?1 WHERE {}", OWNED_ITEM),
            params![is_fixed, item_id, user_id],
        )
        .map_err(|e| format!("Failed to update budget item: {}", e))?;

    if rows == 0 {
        return Err(format!("Budget item with ID {} not found", item_id));
    }
    Ok(())
}
