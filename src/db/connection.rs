use rusqlite::{Connection, Result};

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS budget_categories (
        id TEXT PRIMARY KEY,
        user_id TEXT NOT NULL,
        name TEXT NOT NULL,
        display_order INTEGER,
        UNIQUE (user_id, name)
    );
    CREATE TABLE IF NOT EXISTS budget_items (
        id TEXT PRIMARY KEY,
        category_id TEXT NOT NULL REFERENCES budget_categories(id),
        name TEXT NOT NULL,
        amount TEXT NOT NULL,
        planned_amount TEXT,
        actual_amount TEXT,
        is_fixed INTEGER NOT NULL DEFAULT 0 CHECK (is_fixed IN (0, 1)),
        display_order INTEGER
    );
";

pub fn establish_connection(path: &str) -> Result<Connection> {
    let conn = Connection::open(path)?;
    conn.execute_batch(SCHEMA)?;
    Ok(conn)
}

#[cfg(test)]
pub fn establish_test_connection() -> Result<Connection> {
    let conn = Connection::open_in_memory()?;
    conn.execute_batch(SCHEMA)?;
    Ok(conn)
}
