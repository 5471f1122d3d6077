use crate::models::income::{Income, NewIncome};
use rusqlite::{params, Connection, OptionalExtension};
use tracing::debug;

fn row_to_income(row: &rusqlite::Row<'_>) -> rusqlite::Result<Income> {
    Ok(Income {
        id: row.get(0)?,
        user_id: row.get(1)?,
        source: row.get(2)?,
        amount_cents: row.get(3)?,
        date: row.get(4)?,
        created_at: row.get(5)?,
        updated_at: row.get(6)?,
    })
}

const SELECT_FIELDS: &str =
    "SELECT id, user_id, source, amount_cents, date, created_at, updated_at FROM incomes";

pub fn list_incomes(conn: &Connection, user_id: &str) -> rusqlite::Result<Vec<Income>> {
    let mut stmt = conn.prepare(&format!(
        "{} WHERE user_id = ? ORDER BY date DESC, id DESC",
        SELECT_FIELDS
    ))?;

    let incomes: Vec<Income> = stmt
        .query_map([user_id], row_to_income)?
        .filter_map(|i| i.ok())
        .collect();

    debug!(user_id, count = incomes.len(), "Listed incomes");
    Ok(incomes)
}

pub fn list_incomes_in_range(
    conn: &Connection,
    user_id: &str,
    from: &str,
    to: &str,
) -> rusqlite::Result<Vec<Income>> {
    let mut stmt = conn.prepare(&format!(
        "{} WHERE user_id = ? AND date >= ? AND date <= ? ORDER BY date DESC, id DESC",
        SELECT_FIELDS
    ))?;

    let incomes = stmt
        .query_map(params![user_id, from, to], row_to_income)?
        .filter_map(|i| i.ok())
        .collect();

    Ok(incomes)
}

pub fn get_income(conn: &Connection, user_id: &str, id: i64) -> rusqlite::Result<Option<Income>> {
    conn.query_row(
        &format!("{} WHERE id = ? AND user_id = ?", SELECT_FIELDS),
        params![id, user_id],
        row_to_income,
    )
    .optional()
}

pub fn create_income(
    conn: &Connection,
    user_id: &str,
    income: &NewIncome,
) -> rusqlite::Result<i64> {
    conn.execute(
        "INSERT INTO incomes (user_id, source, amount_cents, date) VALUES (?, ?, ?, ?)",
        params![user_id, income.source, income.amount_cents, income.date],
    )?;
    let id = conn.last_insert_rowid();
    debug!(
        income_id = id,
        amount_cents = income.amount_cents,
        source = %income.source,
        "Created income"
    );
    Ok(id)
}

pub fn update_income(conn: &Connection, income: &Income) -> rusqlite::Result<bool> {
    let rows = conn.execute(
        "UPDATE incomes SET source = ?, amount_cents = ?, date = ?,
         updated_at = datetime('now')
         WHERE id = ? AND user_id = ?",
        params![
            income.source,
            income.amount_cents,
            income.date,
            income.id,
            income.user_id,
        ],
    )?;
    if rows > 0 {
        debug!(income_id = income.id, "Updated income");
    }
    Ok(rows > 0)
}

pub fn delete_income(conn: &Connection, user_id: &str, id: i64) -> rusqlite::Result<bool> {
    let rows = conn.execute(
        "DELETE FROM incomes WHERE id = ? AND user_id = ?",
        params![id, user_id],
    )?;
    if rows > 0 {
        debug!(income_id = id, "Deleted income");
    }
    Ok(rows > 0)
}

/// Rewrite the source label on every income carrying `old_name`. Cascade
/// step for income-kind category renames.
pub fn rename_source_refs(
    conn: &Connection,
    user_id: &str,
    old_name: &str,
    new_name: &str,
) -> rusqlite::Result<usize> {
    let rows = conn.execute(
        "UPDATE incomes SET source = ?, updated_at = datetime('now')
         WHERE user_id = ? AND source = ?",
        params![new_name, user_id, old_name],
    )?;
    Ok(rows)
}
