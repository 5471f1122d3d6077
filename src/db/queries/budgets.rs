use crate::models::budget::Budget;
use rusqlite::{params, Connection, OptionalExtension};
use tracing::debug;

fn row_to_budget(row: &rusqlite::Row<'_>) -> rusqlite::Result<Budget> {
    Ok(Budget {
        id: row.get(0)?,
        user_id: row.get(1)?,
        category: row.get(2)?,
        limit_cents: row.get(3)?,
        created_at: row.get(4)?,
        updated_at: row.get(5)?,
    })
}

const SELECT_FIELDS: &str =
    "SELECT id, user_id, category, limit_cents, created_at, updated_at FROM budgets";

pub fn list_budgets(conn: &Connection, user_id: &str) -> rusqlite::Result<Vec<Budget>> {
    let mut stmt = conn.prepare(&format!("{} WHERE user_id = ? ORDER BY id", SELECT_FIELDS))?;

    let budgets = stmt
        .query_map([user_id], row_to_budget)?
        .filter_map(|b| b.ok())
        .collect();

    Ok(budgets)
}

pub fn get_budget(conn: &Connection, user_id: &str, id: i64) -> rusqlite::Result<Option<Budget>> {
    conn.query_row(
        &format!("{} WHERE id = ? AND user_id = ?", SELECT_FIELDS),
        params![id, user_id],
        row_to_budget,
    )
    .optional()
}

pub fn find_budget_by_category(
    conn: &Connection,
    user_id: &str,
    category: &str,
) -> rusqlite::Result<Option<Budget>> {
    conn.query_row(
        &format!("{} WHERE user_id = ? AND category = ?", SELECT_FIELDS),
        params![user_id, category],
        row_to_budget,
    )
    .optional()
}

pub fn create_budget(
    conn: &Connection,
    user_id: &str,
    category: &str,
    limit_cents: i64,
) -> rusqlite::Result<i64> {
    conn.execute(
        "INSERT INTO budgets (user_id, category, limit_cents) VALUES (?, ?, ?)",
        params![user_id, category, limit_cents],
    )?;
    let id = conn.last_insert_rowid();
    debug!(budget_id = id, category, limit_cents, "Created budget");
    Ok(id)
}

pub fn update_budget(conn: &Connection, budget: &Budget) -> rusqlite::Result<bool> {
    let rows = conn.execute(
        "UPDATE budgets SET category = ?, limit_cents = ?, updated_at = datetime('now')
         WHERE id = ? AND user_id = ?",
        params![
            budget.category,
            budget.limit_cents,
            budget.id,
            budget.user_id,
        ],
    )?;
    if rows > 0 {
        debug!(budget_id = budget.id, "Updated budget");
    }
    Ok(rows > 0)
}

pub fn delete_budget(conn: &Connection, user_id: &str, id: i64) -> rusqlite::Result<bool> {
    let rows = conn.execute(
        "DELETE FROM budgets WHERE id = ? AND user_id = ?",
        params![id, user_id],
    )?;
    if rows > 0 {
        debug!(budget_id = id, "Deleted budget");
    }
    Ok(rows > 0)
}

/// Remove every budget for a category label. Cascade step for expense
/// category deletion; returns the number of rows removed.
pub fn delete_budgets_for_category(
    conn: &Connection,
    user_id: &str,
    category: &str,
) -> rusqlite::Result<usize> {
    let rows = conn.execute(
        "DELETE FROM budgets WHERE user_id = ? AND category = ?",
        params![user_id, category],
    )?;
    Ok(rows)
}

/// Rewrite the category label on every budget carrying `old_name`.
/// Cascade step for expense category renames.
pub fn rename_category_refs(
    conn: &Connection,
    user_id: &str,
    old_name: &str,
    new_name: &str,
) -> rusqlite::Result<usize> {
    let rows = conn.execute(
        "UPDATE budgets SET category = ?, updated_at = datetime('now')
         WHERE user_id = ? AND category = ?",
        params![new_name, user_id, old_name],
    )?;
    Ok(rows)
}
