use crate::models::category::{Category, CategoryKind, NewCategory};
use rusqlite::{params, Connection, OptionalExtension};
use tracing::debug;

fn row_to_category(row: &rusqlite::Row<'_>) -> rusqlite::Result<Category> {
    let kind_str: String = row.get(3)?;
    Ok(Category {
        id: row.get(0)?,
        user_id: row.get(1)?,
        name: row.get(2)?,
        kind: CategoryKind::parse(&kind_str).unwrap_or(CategoryKind::Expense),
        is_default: row.get(4)?,
        created_at: row.get(5)?,
        updated_at: row.get(6)?,
    })
}

pub fn list_categories(
    conn: &Connection,
    user_id: &str,
    kind: CategoryKind,
) -> rusqlite::Result<Vec<Category>> {
    let mut stmt = conn.prepare(
        "SELECT id, user_id, name, kind, is_default, created_at, updated_at
         FROM categories
         WHERE user_id = ? AND kind = ?
         ORDER BY id",
    )?;

    let categories = stmt
        .query_map(params![user_id, kind.as_str()], row_to_category)?
        .filter_map(|c| c.ok())
        .collect();

    Ok(categories)
}

pub fn find_category(
    conn: &Connection,
    user_id: &str,
    kind: CategoryKind,
    name: &str,
) -> rusqlite::Result<Option<Category>> {
    conn.query_row(
        "SELECT id, user_id, name, kind, is_default, created_at, updated_at
         FROM categories
         WHERE user_id = ? AND kind = ? AND name = ?",
        params![user_id, kind.as_str(), name],
        row_to_category,
    )
    .optional()
}

pub fn create_category(
    conn: &Connection,
    user_id: &str,
    category: &NewCategory,
) -> rusqlite::Result<i64> {
    conn.execute(
        "INSERT INTO categories (user_id, name, kind, is_default) VALUES (?, ?, ?, ?)",
        params![
            user_id,
            category.name,
            category.kind.as_str(),
            category.is_default
        ],
    )?;
    let id = conn.last_insert_rowid();
    debug!(category_id = id, name = %category.name, kind = %category.kind, "Created category");
    Ok(id)
}

/// Seed-path upsert keyed by the (name, user, kind) uniqueness index, so
/// concurrent seeding attempts converge without duplicate-key failures.
pub fn upsert_category(
    conn: &Connection,
    user_id: &str,
    name: &str,
    kind: CategoryKind,
    is_default: bool,
) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT INTO categories (user_id, name, kind, is_default) VALUES (?, ?, ?, ?)
         ON CONFLICT (name, user_id, kind)
         DO UPDATE SET is_default = excluded.is_default, updated_at = datetime('now')",
        params![user_id, name, kind.as_str(), is_default],
    )?;
    Ok(())
}

pub fn rename_category(
    conn: &Connection,
    id: i64,
    new_name: &str,
) -> rusqlite::Result<bool> {
    let rows = conn.execute(
        "UPDATE categories SET name = ?, updated_at = datetime('now') WHERE id = ?",
        params![new_name, id],
    )?;
    if rows > 0 {
        debug!(category_id = id, name = %new_name, "Renamed category");
    }
    Ok(rows > 0)
}

pub fn delete_category(
    conn: &Connection,
    user_id: &str,
    kind: CategoryKind,
    name: &str,
) -> rusqlite::Result<bool> {
    let rows = conn.execute(
        "DELETE FROM categories WHERE user_id = ? AND kind = ? AND name = ?",
        params![user_id, kind.as_str(), name],
    )?;
    if rows > 0 {
        debug!(user_id, name, kind = %kind, "Deleted category");
    }
    Ok(rows > 0)
}
