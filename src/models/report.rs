use std::collections::HashMap;

use serde::Serialize;

use crate::models::budget::Budget;
use crate::models::expense::Expense;
use crate::models::income::Income;

/// One row of the compact per-category totals list (the quick-view
/// report shape).
#[derive(Debug, Clone, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total_cents: i64,
}

/// Per-category accumulation inside a full report.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CategorySpend {
    pub total_cents: i64,
    pub items: Vec<Expense>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BudgetStatus {
    Overspent,
    WithinBudget,
    NoBudget,
}

impl BudgetStatus {
    pub fn label(&self) -> &'static str {
        match self {
            BudgetStatus::Overspent => "Overspent",
            BudgetStatus::WithinBudget => "Within Budget",
            BudgetStatus::NoBudget => "No Budget",
        }
    }
}

/// One row of the document report's breakdown table.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryBreakdownRow {
    pub category: String,
    pub total_cents: i64,
    pub limit_cents: Option<i64>,
    pub status: BudgetStatus,
}

/// Point-in-time aggregation of a user's ledger over a date window.
/// Derived, never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct ReportData {
    pub start_date: String,
    pub end_date: String,
    pub total_income_cents: i64,
    pub total_expenses_cents: i64,
    pub net_savings_cents: i64,
    pub incomes: Vec<Income>,
    pub expenses: Vec<Expense>,
    pub expenses_by_category: HashMap<String, CategorySpend>,
    pub overspent_categories: Vec<String>,
    pub budgets: HashMap<String, Budget>,
}

impl ReportData {
    /// Compact totals list, sorted descending by total.
    pub fn category_totals(&self) -> Vec<CategoryTotal> {
        let mut totals: Vec<CategoryTotal> = self
            .expenses_by_category
            .iter()
            .map(|(category, spend)| CategoryTotal {
                category: category.clone(),
                total_cents: spend.total_cents,
            })
            .collect();
        totals.sort_by(|a, b| b.total_cents.cmp(&a.total_cents).then(a.category.cmp(&b.category)));
        totals
    }

    /// Breakdown rows with budget status, sorted descending by total.
    /// A category without a budget is never flagged, whatever the spend;
    /// the overspend comparison is strictly greater-than.
    pub fn breakdown(&self) -> Vec<CategoryBreakdownRow> {
        let mut rows: Vec<CategoryBreakdownRow> = self
            .expenses_by_category
            .iter()
            .map(|(category, spend)| {
                let limit_cents = self.budgets.get(category).map(|b| b.limit_cents);
                let status = match limit_cents {
                    Some(limit) if spend.total_cents > limit => BudgetStatus::Overspent,
                    Some(_) => BudgetStatus::WithinBudget,
                    None => BudgetStatus::NoBudget,
                };
                CategoryBreakdownRow {
                    category: category.clone(),
                    total_cents: spend.total_cents,
                    limit_cents,
                    status,
                }
            })
            .collect();
        rows.sort_by(|a, b| b.total_cents.cmp(&a.total_cents).then(a.category.cmp(&b.category)));
        rows
    }
}
