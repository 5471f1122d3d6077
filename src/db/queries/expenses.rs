use crate::models::expense::{Expense, NewExpense};
use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, warn};

fn row_to_expense(row: &rusqlite::Row<'_>) -> rusqlite::Result<Expense> {
    Ok(Expense {
        id: row.get(0)?,
        user_id: row.get(1)?,
        description: row.get(2)?,
        amount_cents: row.get(3)?,
        category: row.get(4)?,
        date: row.get(5)?,
        created_at: row.get(6)?,
        updated_at: row.get(7)?,
    })
}

const SELECT_FIELDS: &str =
    "SELECT id, user_id, description, amount_cents, category, date, created_at, updated_at
     FROM expenses";

pub fn list_expenses(conn: &Connection, user_id: &str) -> rusqlite::Result<Vec<Expense>> {
    let mut stmt = conn.prepare(&format!(
        "{} WHERE user_id = ? ORDER BY date DESC, id DESC",
        SELECT_FIELDS
    ))?;

    let expenses: Vec<Expense> = stmt
        .query_map([user_id], row_to_expense)?
        .filter_map(|e| e.ok())
        .collect();

    debug!(user_id, count = expenses.len(), "Listed expenses");
    Ok(expenses)
}

/// Expenses with `from <= date <= to`, both bounds in storage text form.
pub fn list_expenses_in_range(
    conn: &Connection,
    user_id: &str,
    from: &str,
    to: &str,
) -> rusqlite::Result<Vec<Expense>> {
    let mut stmt = conn.prepare(&format!(
        "{} WHERE user_id = ? AND date >= ? AND date <= ? ORDER BY date DESC, id DESC",
        SELECT_FIELDS
    ))?;

    let expenses = stmt
        .query_map(params![user_id, from, to], row_to_expense)?
        .filter_map(|e| e.ok())
        .collect();

    Ok(expenses)
}

pub fn get_expense(
    conn: &Connection,
    user_id: &str,
    id: i64,
) -> rusqlite::Result<Option<Expense>> {
    conn.query_row(
        &format!("{} WHERE id = ? AND user_id = ?", SELECT_FIELDS),
        params![id, user_id],
        row_to_expense,
    )
    .optional()
}

pub fn create_expense(
    conn: &Connection,
    user_id: &str,
    expense: &NewExpense,
) -> rusqlite::Result<i64> {
    conn.execute(
        "INSERT INTO expenses (user_id, description, amount_cents, category, date)
         VALUES (?, ?, ?, ?, ?)",
        params![
            user_id,
            expense.description,
            expense.amount_cents,
            expense.category,
            expense.date,
        ],
    )?;
    let id = conn.last_insert_rowid();
    debug!(
        expense_id = id,
        amount_cents = expense.amount_cents,
        category = %expense.category,
        "Created expense"
    );
    Ok(id)
}

pub fn update_expense(conn: &Connection, expense: &Expense) -> rusqlite::Result<bool> {
    let rows = conn.execute(
        "UPDATE expenses SET description = ?, amount_cents = ?, category = ?, date = ?,
         updated_at = datetime('now')
         WHERE id = ? AND user_id = ?",
        params![
            expense.description,
            expense.amount_cents,
            expense.category,
            expense.date,
            expense.id,
            expense.user_id,
        ],
    )?;
    if rows > 0 {
        debug!(expense_id = expense.id, "Updated expense");
    }
    Ok(rows > 0)
}

pub fn delete_expense(conn: &Connection, user_id: &str, id: i64) -> rusqlite::Result<bool> {
    let rows = conn.execute(
        "DELETE FROM expenses WHERE id = ? AND user_id = ?",
        params![id, user_id],
    )?;
    if rows > 0 {
        debug!(expense_id = id, "Deleted expense");
    }
    Ok(rows > 0)
}

pub fn delete_all_expenses(conn: &Connection, user_id: &str) -> rusqlite::Result<usize> {
    let rows = conn.execute("DELETE FROM expenses WHERE user_id = ?", [user_id])?;
    warn!(user_id, count = rows, "Deleted all expenses");
    Ok(rows)
}

/// Rewrite the category label on every expense carrying `old_name`.
/// Cascade step for category renames; returns the number of rows touched.
pub fn rename_category_refs(
    conn: &Connection,
    user_id: &str,
    old_name: &str,
    new_name: &str,
) -> rusqlite::Result<usize> {
    let rows = conn.execute(
        "UPDATE expenses SET category = ?, updated_at = datetime('now')
         WHERE user_id = ? AND category = ?",
        params![new_name, user_id, old_name],
    )?;
    Ok(rows)
}
