//! One-time default category seeding, run on first profile fetch.

use rusqlite::Connection;
use tracing::info;

use crate::db::queries::{categories, users};
use crate::error::AppResult;
use crate::models::category::CategoryKind;
use crate::models::user::UserProfile;

pub const DEFAULT_EXPENSE_CATEGORIES: &[&str] = &[
    "Food",
    "Miscellaneous",
    "Groceries",
    "Maid",
    "Entertainment",
    "Electricity",
    "Rent",
    "Loan Repayment",
];

pub const DEFAULT_INCOME_CATEGORIES: &[&str] = &["Salary", "Freelance", "Investments"];

/// Fetch (creating if necessary) the profile row for an external user id
/// and seed the default categories exactly once. Seed writes are upserts
/// keyed by (name, user, kind), so two concurrent first-requests converge
/// on the same category set without duplicate-key failures; the seeded
/// flag flips only after every write has succeeded.
pub fn fetch_profile(
    conn: &Connection,
    user_id: &str,
    name: &str,
    email: &str,
) -> AppResult<UserProfile> {
    let profile = users::get_or_create_profile(conn, user_id, name, email)?;

    if !profile.categories_seeded {
        seed_default_categories(conn, user_id)?;
        users::set_categories_seeded(conn, user_id)?;
        info!(user_id, "Seeded default categories");
        return Ok(UserProfile {
            categories_seeded: true,
            ..profile
        });
    }

    Ok(profile)
}

pub fn seed_default_categories(conn: &Connection, user_id: &str) -> AppResult<()> {
    for name in DEFAULT_EXPENSE_CATEGORIES {
        categories::upsert_category(conn, user_id, name, CategoryKind::Expense, true)?;
    }
    for name in DEFAULT_INCOME_CATEGORIES {
        categories::upsert_category(conn, user_id, name, CategoryKind::Income, true)?;
    }
    Ok(())
}
