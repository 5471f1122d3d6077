//! Category taxonomy: uniqueness, rename/delete cascades, user scoping,
//! and the legacy custom-category list.

mod common;

use common::{add_expense, add_income, set_budget, setup_user, TestDb};
use fintrack::error::{AppError, ErrorKind};
use fintrack::models::category::CategoryKind;
use fintrack::services::{categories, ledger};

/// Adding the same name twice for one (user, kind) fails the second call
/// and leaves the list unchanged.
#[test]
fn test_duplicate_category_rejected() {
    let db = TestDb::new();
    let conn = db.conn();
    setup_user(&conn, "u1");

    let before = categories::add(&conn, "u1", CategoryKind::Expense, "Travel").unwrap();

    let err = categories::add(&conn, "u1", CategoryKind::Expense, "Travel").unwrap_err();
    assert!(matches!(err, AppError::DuplicateCategory(_)));
    assert_eq!(err.kind(), ErrorKind::Conflict);

    let after = categories::list(&conn, "u1", CategoryKind::Expense).unwrap();
    assert_eq!(after.len(), before.len());
}

/// The same name is fine for a different kind or a different user.
#[test]
fn test_uniqueness_scoped_to_user_and_kind() {
    let db = TestDb::new();
    let conn = db.conn();
    setup_user(&conn, "u1");
    setup_user(&conn, "u2");

    categories::add(&conn, "u1", CategoryKind::Expense, "Royalties").unwrap();
    categories::add(&conn, "u1", CategoryKind::Income, "Royalties").unwrap();
    categories::add(&conn, "u2", CategoryKind::Expense, "Royalties").unwrap();
}

#[test]
fn test_add_trims_name() {
    let db = TestDb::new();
    let conn = db.conn();
    setup_user(&conn, "u1");

    let list = categories::add(&conn, "u1", CategoryKind::Expense, "  Travel  ").unwrap();
    assert!(list.iter().any(|c| c.name == "Travel"));

    let err = categories::add(&conn, "u1", CategoryKind::Expense, "   ").unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

/// Renaming an expense category rewrites every expense and budget
/// holding the old label; no row with the old label survives.
#[test]
fn test_rename_cascades_to_expenses_and_budgets() {
    let db = TestDb::new();
    let conn = db.conn();
    setup_user(&conn, "u1");

    add_expense(&conn, "u1", "Food", 50_00, "2024-01-01");
    add_expense(&conn, "u1", "Food", 30_00, "2024-01-02");
    add_expense(&conn, "u1", "Rent", 900_00, "2024-01-03");
    set_budget(&conn, "u1", "Food", 100_00);

    let list =
        categories::rename(&conn, "u1", CategoryKind::Expense, "Food", "Dining").unwrap();
    assert!(list.iter().any(|c| c.name == "Dining"));
    assert!(!list.iter().any(|c| c.name == "Food"));

    let entries = ledger::list_expenses(&conn, "u1").unwrap();
    assert_eq!(entries.iter().filter(|e| e.category == "Dining").count(), 2);
    assert_eq!(entries.iter().filter(|e| e.category == "Food").count(), 0);
    assert_eq!(entries.iter().filter(|e| e.category == "Rent").count(), 1);

    let budgets = fintrack::services::budgets::list(&conn, "u1").unwrap();
    assert!(budgets.contains_key("Dining"));
    assert!(!budgets.contains_key("Food"));
    assert_eq!(budgets["Dining"].limit_cents, 100_00);
}

/// Income category renames rewrite income sources and never touch
/// budgets.
#[test]
fn test_income_rename_cascades_to_sources_only() {
    let db = TestDb::new();
    let conn = db.conn();
    setup_user(&conn, "u1");

    add_income(&conn, "u1", "Salary", 5000_00, "2024-01-01");
    add_income(&conn, "u1", "Freelance", 800_00, "2024-01-05");
    set_budget(&conn, "u1", "Salary", 1_00); // expense-label budget sharing the name

    categories::rename(&conn, "u1", CategoryKind::Income, "Salary", "Wages").unwrap();

    let incomes = ledger::list_incomes(&conn, "u1").unwrap();
    assert!(incomes.iter().any(|i| i.source == "Wages"));
    assert!(!incomes.iter().any(|i| i.source == "Salary"));

    let budgets = fintrack::services::budgets::list(&conn, "u1").unwrap();
    assert!(budgets.contains_key("Salary"), "budget must be untouched");
}

#[test]
fn test_rename_missing_category_is_not_found() {
    let db = TestDb::new();
    let conn = db.conn();
    setup_user(&conn, "u1");

    let err =
        categories::rename(&conn, "u1", CategoryKind::Expense, "Nope", "Still Nope").unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[test]
fn test_rename_to_existing_name_is_conflict() {
    let db = TestDb::new();
    let conn = db.conn();
    setup_user(&conn, "u1");

    categories::add(&conn, "u1", CategoryKind::Expense, "Travel").unwrap();

    let err =
        categories::rename(&conn, "u1", CategoryKind::Expense, "Food", "Travel").unwrap_err();
    assert!(matches!(err, AppError::DuplicateCategory(_)));

    // The failed rename must not have cascaded anything.
    let entries = ledger::list_expenses(&conn, "u1").unwrap();
    assert!(entries.iter().all(|e| e.category != "Travel"));
}

/// Name matching is exact and case-sensitive.
#[test]
fn test_rename_is_case_sensitive() {
    let db = TestDb::new();
    let conn = db.conn();
    setup_user(&conn, "u1");

    let err = categories::rename(&conn, "u1", CategoryKind::Expense, "food", "Dining")
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

/// Deleting a category removes its budget but leaves ledger entries
/// holding the stale label.
#[test]
fn test_delete_cascades_budget_but_orphans_entries() {
    let db = TestDb::new();
    let conn = db.conn();
    setup_user(&conn, "u1");

    add_expense(&conn, "u1", "Food", 50_00, "2024-01-01");
    set_budget(&conn, "u1", "Food", 100_00);

    let list = categories::delete(&conn, "u1", CategoryKind::Expense, "Food").unwrap();
    assert!(!list.iter().any(|c| c.name == "Food"));

    let budgets = fintrack::services::budgets::list(&conn, "u1").unwrap();
    assert!(!budgets.contains_key("Food"));

    let entries = ledger::list_expenses(&conn, "u1").unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].category, "Food", "entry keeps the orphaned label");
}

#[test]
fn test_delete_missing_category_is_not_found() {
    let db = TestDb::new();
    let conn = db.conn();
    setup_user(&conn, "u1");

    let err = categories::delete(&conn, "u1", CategoryKind::Expense, "Ghost").unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

/// One user's operations never see another user's categories.
#[test]
fn test_categories_isolated_per_user() {
    let db = TestDb::new();
    let conn = db.conn();
    setup_user(&conn, "u1");
    setup_user(&conn, "u2");

    categories::add(&conn, "u1", CategoryKind::Expense, "Secret").unwrap();

    let err = categories::delete(&conn, "u2", CategoryKind::Expense, "Secret").unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
    assert!(categories::list(&conn, "u1", CategoryKind::Expense)
        .unwrap()
        .iter()
        .any(|c| c.name == "Secret"));
}

/// Legacy custom-category list: duplicates rejected, rename cascades
/// into expense rows.
#[test]
fn test_custom_category_list() {
    let db = TestDb::new();
    let conn = db.conn();
    setup_user(&conn, "u1");

    let custom = categories::list_custom(&conn, "u1").unwrap();
    assert!(custom.contains(&"Groceries".to_string()), "legacy defaults present");

    let err = categories::add_custom(&conn, "u1", "Groceries").unwrap_err();
    assert!(matches!(err, AppError::DuplicateCategory(_)));

    let custom = categories::add_custom(&conn, "u1", "Pets").unwrap();
    assert!(custom.contains(&"Pets".to_string()));

    add_expense(&conn, "u1", "Pets", 20_00, "2024-02-01");
    let custom = categories::rename_custom(&conn, "u1", "Pets", "Pet Care").unwrap();
    assert!(custom.contains(&"Pet Care".to_string()));
    assert!(!custom.contains(&"Pets".to_string()));

    let entries = ledger::list_expenses(&conn, "u1").unwrap();
    assert!(entries.iter().any(|e| e.category == "Pet Care"));
    assert!(!entries.iter().any(|e| e.category == "Pets"));
}

#[test]
fn test_custom_rename_missing_is_not_found() {
    let db = TestDb::new();
    let conn = db.conn();
    setup_user(&conn, "u1");

    let err = categories::rename_custom(&conn, "u1", "Nope", "Other").unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}
