//! Shared test utilities for integration tests.
//!
//! Provides a `TestDb` over a fresh in-memory database plus helpers for
//! creating users and ledger entries through the service layer.

#![allow(dead_code)]

use fintrack::date_utils::DateRange;
use fintrack::db::{create_in_memory_pool, migrations, DbPool};
use fintrack::models::budget::{Budget, NewBudget};
use fintrack::models::expense::{Expense, NewExpense};
use fintrack::models::income::{Income, NewIncome};
use fintrack::models::user::UserProfile;
use fintrack::services::{budgets, ledger, seed};
use r2d2::PooledConnection;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;

pub struct TestDb {
    pub pool: DbPool,
}

impl TestDb {
    /// Fresh in-memory database with the schema applied.
    pub fn new() -> Self {
        let pool = create_in_memory_pool().expect("Failed to create in-memory pool");
        {
            let conn = pool.get().expect("Failed to get connection");
            migrations::run_migrations(&conn).expect("Failed to run migrations");
        }
        Self { pool }
    }

    pub fn conn(&self) -> PooledConnection<SqliteConnectionManager> {
        self.pool.get().expect("Failed to get connection")
    }
}

impl Default for TestDb {
    fn default() -> Self {
        Self::new()
    }
}

/// Create (and seed) a profile for an opaque user id.
pub fn setup_user(conn: &Connection, user_id: &str) -> UserProfile {
    seed::fetch_profile(conn, user_id, "Test User", &format!("{}@example.com", user_id))
        .expect("Failed to set up user")
}

pub fn add_expense(
    conn: &Connection,
    user_id: &str,
    category: &str,
    amount_cents: i64,
    date: &str,
) -> Expense {
    ledger::add_expense(
        conn,
        user_id,
        &NewExpense {
            description: None,
            amount_cents,
            category: category.to_string(),
            date: date.to_string(),
        },
    )
    .expect("Failed to add expense")
}

pub fn add_income(
    conn: &Connection,
    user_id: &str,
    source: &str,
    amount_cents: i64,
    date: &str,
) -> Income {
    ledger::add_income(
        conn,
        user_id,
        &NewIncome {
            source: source.to_string(),
            amount_cents,
            date: date.to_string(),
        },
    )
    .expect("Failed to add income")
}

pub fn set_budget(conn: &Connection, user_id: &str, category: &str, limit_cents: i64) -> Budget {
    budgets::set(
        conn,
        user_id,
        &NewBudget {
            category: category.to_string(),
            limit_cents,
        },
    )
    .expect("Failed to set budget")
}

pub fn range(start: &str, end: &str) -> DateRange {
    DateRange::parse(Some(start), Some(end)).expect("Failed to parse range")
}
