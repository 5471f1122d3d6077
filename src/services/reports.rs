//! Report aggregation: groups ledger entries over a date window,
//! computes totals and overspend, and feeds both the compact JSON shape
//! and the full document report.

use std::collections::HashMap;

use rusqlite::Connection;
use tracing::debug;

use crate::date_utils::DateRange;
use crate::db::queries::{expenses, incomes};
use crate::error::AppResult;
use crate::models::budget::Budget;
use crate::models::expense::Expense;
use crate::models::income::Income;
use crate::models::report::{BudgetStatus, CategorySpend, CategoryTotal, ReportData};
use crate::services::budgets;

/// Build the full report for a user over an inclusive date window.
///
/// Budgets, expenses and incomes are read as separate queries; a write
/// landing between them can show through as a slightly inconsistent
/// snapshot, which is accepted for a best-effort point-in-time view.
/// An empty window produces a well-formed zero-valued report.
pub fn build_report(conn: &Connection, user_id: &str, range: &DateRange) -> AppResult<ReportData> {
    let budget_map = budgets::list(conn, user_id)?;

    let from = range.start_bound();
    let to = range.end_bound();
    let expense_rows = expenses::list_expenses_in_range(conn, user_id, &from, &to)?;
    let income_rows = incomes::list_incomes_in_range(conn, user_id, &from, &to)?;

    let total_income_cents: i64 = income_rows.iter().map(|i| i.amount_cents).sum();
    let total_expenses_cents: i64 = expense_rows.iter().map(|e| e.amount_cents).sum();

    let mut expenses_by_category: HashMap<String, CategorySpend> = HashMap::new();
    for expense in &expense_rows {
        let entry = expenses_by_category
            .entry(expense.category.clone())
            .or_default();
        entry.total_cents += expense.amount_cents;
        entry.items.push(expense.clone());
    }

    let mut report = ReportData {
        start_date: range.start.format("%Y-%m-%d").to_string(),
        end_date: range.end.format("%Y-%m-%d").to_string(),
        total_income_cents,
        total_expenses_cents,
        net_savings_cents: total_income_cents - total_expenses_cents,
        incomes: income_rows,
        expenses: expense_rows,
        expenses_by_category,
        overspent_categories: Vec::new(),
        budgets: budget_map,
    };

    report.overspent_categories = report
        .breakdown()
        .into_iter()
        .filter(|row| row.status == BudgetStatus::Overspent)
        .map(|row| row.category)
        .collect();

    debug!(
        user_id,
        range = %range,
        expenses = report.expenses.len(),
        incomes = report.incomes.len(),
        overspent = report.overspent_categories.len(),
        "Built report"
    );
    Ok(report)
}

/// Compact per-category expense totals, sorted descending by total (the
/// quick-view report shape). Only expenses are consulted.
pub fn category_totals(
    conn: &Connection,
    user_id: &str,
    range: &DateRange,
) -> AppResult<Vec<CategoryTotal>> {
    let from = range.start_bound();
    let to = range.end_bound();
    let expense_rows = expenses::list_expenses_in_range(conn, user_id, &from, &to)?;

    let mut totals_map: HashMap<String, i64> = HashMap::new();
    for expense in &expense_rows {
        *totals_map.entry(expense.category.clone()).or_default() += expense.amount_cents;
    }

    let mut totals: Vec<CategoryTotal> = totals_map
        .into_iter()
        .map(|(category, total_cents)| CategoryTotal {
            category,
            total_cents,
        })
        .collect();
    totals.sort_by(|a, b| b.total_cents.cmp(&a.total_cents).then(a.category.cmp(&b.category)));
    Ok(totals)
}

/// The user's whole ledger, unwindowed, as context for the free-form AI
/// summary.
#[derive(Debug, Clone, serde::Serialize)]
pub struct LedgerSnapshot {
    pub budgets: HashMap<String, Budget>,
    pub incomes: Vec<Income>,
    pub expenses: Vec<Expense>,
}

pub fn ledger_snapshot(conn: &Connection, user_id: &str) -> AppResult<LedgerSnapshot> {
    Ok(LedgerSnapshot {
        budgets: budgets::list(conn, user_id)?,
        incomes: incomes::list_incomes(conn, user_id)?,
        expenses: expenses::list_expenses(conn, user_id)?,
    })
}
