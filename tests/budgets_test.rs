//! Budget store: upsert semantics, mapping representation, id-scoped
//! update/delete.

mod common;

use common::{set_budget, setup_user, TestDb};
use fintrack::error::AppError;
use fintrack::models::budget::{BudgetUpdate, NewBudget};
use fintrack::services::budgets;

/// Setting a budget twice for the same category updates the one row in
/// place instead of creating a second.
#[test]
fn test_set_budget_upserts() {
    let db = TestDb::new();
    let conn = db.conn();
    setup_user(&conn, "u1");

    let first = set_budget(&conn, "u1", "Food", 100_00);
    let second = set_budget(&conn, "u1", "Food", 250_00);

    assert_eq!(first.id, second.id);
    assert_eq!(second.limit_cents, 250_00);

    let map = budgets::list(&conn, "u1").unwrap();
    assert_eq!(map.len(), 1);
    assert_eq!(map["Food"].limit_cents, 250_00);
}

/// The list representation is a mapping keyed by category name.
#[test]
fn test_list_is_keyed_by_category() {
    let db = TestDb::new();
    let conn = db.conn();
    setup_user(&conn, "u1");

    set_budget(&conn, "u1", "Food", 100_00);
    set_budget(&conn, "u1", "Rent", 900_00);

    let map = budgets::list(&conn, "u1").unwrap();
    assert_eq!(map.len(), 2);
    assert_eq!(map["Food"].category, "Food");
    assert_eq!(map["Rent"].limit_cents, 900_00);
}

#[test]
fn test_set_budget_requires_category() {
    let db = TestDb::new();
    let conn = db.conn();
    setup_user(&conn, "u1");

    let err = budgets::set(
        &conn,
        "u1",
        &NewBudget {
            category: "  ".into(),
            limit_cents: 100_00,
        },
    )
    .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[test]
fn test_update_budget_by_id() {
    let db = TestDb::new();
    let conn = db.conn();
    setup_user(&conn, "u1");

    let budget = set_budget(&conn, "u1", "Food", 100_00);

    let updated = budgets::update(
        &conn,
        "u1",
        budget.id,
        &BudgetUpdate {
            limit_cents: Some(120_00),
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(updated.limit_cents, 120_00);
    assert_eq!(updated.category, "Food");

    let err = budgets::update(
        &conn,
        "u1",
        9999,
        &BudgetUpdate {
            limit_cents: Some(1),
            ..Default::default()
        },
    )
    .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[test]
fn test_budgets_isolated_per_user() {
    let db = TestDb::new();
    let conn = db.conn();
    setup_user(&conn, "u1");
    setup_user(&conn, "u2");

    let budget = set_budget(&conn, "u1", "Food", 100_00);

    let err = budgets::delete(&conn, "u2", budget.id).unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    budgets::delete(&conn, "u1", budget.id).unwrap();
    assert!(budgets::list(&conn, "u1").unwrap().is_empty());
}
