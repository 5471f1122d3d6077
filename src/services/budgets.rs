//! Budget operations. The external representation of the budget list is
//! a mapping keyed by category name, which gives the aggregator O(1)
//! lookup while grouping expenses.

use std::collections::HashMap;

use rusqlite::Connection;

use crate::db::queries::budgets;
use crate::error::{AppError, AppResult};
use crate::models::budget::{Budget, BudgetUpdate, NewBudget};

pub fn list(conn: &Connection, user_id: &str) -> AppResult<HashMap<String, Budget>> {
    let map = budgets::list_budgets(conn, user_id)?
        .into_iter()
        .map(|b| (b.category.clone(), b))
        .collect();
    Ok(map)
}

/// Upsert by (user, category): the first set creates the row, later sets
/// update its limit in place. There is never more than one budget per
/// category label.
pub fn set(conn: &Connection, user_id: &str, new: &NewBudget) -> AppResult<Budget> {
    let category = new.category.trim();
    if category.is_empty() {
        return Err(AppError::Validation("Category name is required".into()));
    }

    match budgets::find_budget_by_category(conn, user_id, category)? {
        Some(mut budget) => {
            budget.limit_cents = new.limit_cents;
            budgets::update_budget(conn, &budget)?;
            Ok(budget)
        }
        None => {
            let id = budgets::create_budget(conn, user_id, category, new.limit_cents)?;
            budgets::get_budget(conn, user_id, id)?
                .ok_or_else(|| AppError::Internal("Budget vanished after insert".into()))
        }
    }
}

pub fn update(
    conn: &Connection,
    user_id: &str,
    id: i64,
    update: &BudgetUpdate,
) -> AppResult<Budget> {
    let mut budget = budgets::get_budget(conn, user_id, id)?
        .ok_or_else(|| AppError::NotFound("Budget not found".into()))?;

    if let Some(category) = &update.category {
        budget.category = category.clone();
    }
    if let Some(limit_cents) = update.limit_cents {
        budget.limit_cents = limit_cents;
    }

    if !budgets::update_budget(conn, &budget)? {
        return Err(AppError::NotFound("Budget not found".into()));
    }
    Ok(budget)
}

pub fn delete(conn: &Connection, user_id: &str, id: i64) -> AppResult<()> {
    if !budgets::delete_budget(conn, user_id, id)? {
        return Err(AppError::NotFound("Budget not found".into()));
    }
    Ok(())
}
