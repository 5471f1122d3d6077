//! Keeps the string-valued category references in expenses, incomes and
//! budgets consistent with the category taxonomy. Categories are
//! identified by name, so every rename or delete has to touch dependents
//! explicitly.
//!
//! The cascade is a sequence of independent statements, not a single
//! transaction. A crash mid-way leaves at worst a stale label, which the
//! reporting path already treats as a valid budget-less category.

use rusqlite::Connection;
use tracing::debug;

use crate::db::queries::{budgets, expenses, incomes};
use crate::error::AppResult;
use crate::models::category::CategoryKind;

/// Row counts touched by a rename cascade.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CascadeOutcome {
    pub ledger_rows: usize,
    pub budget_rows: usize,
}

/// Propagate a category rename into every dependent row holding the old
/// label: expenses (expense kind) or incomes (income kind), plus budgets
/// for expense-kind categories. Invoked after the category row itself
/// has been renamed.
pub fn apply_rename(
    conn: &Connection,
    user_id: &str,
    kind: CategoryKind,
    old_name: &str,
    new_name: &str,
) -> AppResult<CascadeOutcome> {
    let outcome = match kind {
        CategoryKind::Expense => CascadeOutcome {
            ledger_rows: expenses::rename_category_refs(conn, user_id, old_name, new_name)?,
            budget_rows: budgets::rename_category_refs(conn, user_id, old_name, new_name)?,
        },
        CategoryKind::Income => CascadeOutcome {
            ledger_rows: incomes::rename_source_refs(conn, user_id, old_name, new_name)?,
            budget_rows: 0,
        },
    };

    debug!(
        user_id,
        kind = %kind,
        old_name,
        new_name,
        ledger_rows = outcome.ledger_rows,
        budget_rows = outcome.budget_rows,
        "Applied rename cascade"
    );
    Ok(outcome)
}

/// Cascade for a category delete: budgets for the label are removed
/// (expense kind only). Ledger rows are left holding the stale label on
/// purpose; reporting treats an unmatched label as a budget-less
/// category.
pub fn apply_delete(
    conn: &Connection,
    user_id: &str,
    kind: CategoryKind,
    name: &str,
) -> AppResult<usize> {
    let budget_rows = match kind {
        CategoryKind::Expense => budgets::delete_budgets_for_category(conn, user_id, name)?,
        CategoryKind::Income => 0,
    };

    debug!(user_id, kind = %kind, name, budget_rows, "Applied delete cascade");
    Ok(budget_rows)
}

/// Cascade for a rename in the legacy free-text category list on the
/// user profile. Early ledger entries reference these names; only
/// expense rows are rewritten.
pub fn apply_legacy_rename(
    conn: &Connection,
    user_id: &str,
    old_name: &str,
    new_name: &str,
) -> AppResult<usize> {
    let rows = expenses::rename_category_refs(conn, user_id, old_name, new_name)?;
    debug!(user_id, old_name, new_name, rows, "Applied legacy rename cascade");
    Ok(rows)
}
