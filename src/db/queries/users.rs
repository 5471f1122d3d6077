use crate::models::user::UserProfile;
use rusqlite::{params, Connection, OptionalExtension};
use tracing::debug;

/// Free-text category names every new profile starts with, kept for
/// backward compatibility with ledger entries that predate the
/// structured category collection.
pub const LEGACY_DEFAULT_CATEGORIES: &[&str] = &[
    "Rent",
    "Electricity",
    "Maid",
    "Groceries",
    "Food",
    "Entertainment",
    "Loan Repayment",
    "Miscellaneous",
];

fn row_to_profile(row: &rusqlite::Row<'_>) -> rusqlite::Result<UserProfile> {
    let custom_json: String = row.get(3)?;
    Ok(UserProfile {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        custom_categories: serde_json::from_str(&custom_json).unwrap_or_default(),
        categories_seeded: row.get(4)?,
        created_at: row.get(5)?,
        updated_at: row.get(6)?,
    })
}

const SELECT_FIELDS: &str = "SELECT id, name, email, custom_categories, categories_seeded, \
     created_at, updated_at FROM users";

pub fn get_profile(conn: &Connection, user_id: &str) -> rusqlite::Result<Option<UserProfile>> {
    conn.query_row(
        &format!("{} WHERE id = ?", SELECT_FIELDS),
        [user_id],
        row_to_profile,
    )
    .optional()
}

/// Fetch the profile row for an externally-issued user id, creating it
/// with the legacy default category list on first sight.
pub fn get_or_create_profile(
    conn: &Connection,
    user_id: &str,
    name: &str,
    email: &str,
) -> rusqlite::Result<UserProfile> {
    if let Some(profile) = get_profile(conn, user_id)? {
        return Ok(profile);
    }

    let custom_json = serde_json::to_string(LEGACY_DEFAULT_CATEGORIES)
        .unwrap_or_else(|_| "[]".into());
    conn.execute(
        "INSERT INTO users (id, name, email, custom_categories) VALUES (?, ?, ?, ?)
         ON CONFLICT (id) DO NOTHING",
        params![user_id, name, email, custom_json],
    )?;
    debug!(user_id, "Created user profile");

    get_profile(conn, user_id)?.ok_or(rusqlite::Error::QueryReturnedNoRows)
}

pub fn set_categories_seeded(conn: &Connection, user_id: &str) -> rusqlite::Result<()> {
    conn.execute(
        "UPDATE users SET categories_seeded = 1, updated_at = datetime('now') WHERE id = ?",
        [user_id],
    )?;
    Ok(())
}

pub fn set_custom_categories(
    conn: &Connection,
    user_id: &str,
    categories: &[String],
) -> rusqlite::Result<()> {
    let custom_json = serde_json::to_string(categories).unwrap_or_else(|_| "[]".into());
    conn.execute(
        "UPDATE users SET custom_categories = ?, updated_at = datetime('now') WHERE id = ?",
        params![custom_json, user_id],
    )?;
    Ok(())
}
