//! Expense and income CRUD. The two record kinds are structurally
//! identical apart from field names (`category`/`description` vs
//! `source`), so the functions come in matched pairs.
//!
//! Amount sign is deliberately not validated here; the stores accept
//! whatever the caller recorded and the aggregation sums it exactly.

use rusqlite::Connection;

use crate::date_utils::normalize_datetime;
use crate::db::queries::{expenses, incomes};
use crate::error::{AppError, AppResult};
use crate::models::expense::{Expense, ExpenseUpdate, NewExpense};
use crate::models::income::{Income, IncomeUpdate, NewIncome};

pub fn list_expenses(conn: &Connection, user_id: &str) -> AppResult<Vec<Expense>> {
    Ok(expenses::list_expenses(conn, user_id)?)
}

pub fn add_expense(conn: &Connection, user_id: &str, new: &NewExpense) -> AppResult<Expense> {
    let record = NewExpense {
        date: normalize_datetime(&new.date)?,
        ..new.clone()
    };

    let id = expenses::create_expense(conn, user_id, &record)?;
    expenses::get_expense(conn, user_id, id)?
        .ok_or_else(|| AppError::Internal("Expense vanished after insert".into()))
}

pub fn update_expense(
    conn: &Connection,
    user_id: &str,
    id: i64,
    update: &ExpenseUpdate,
) -> AppResult<Expense> {
    let mut expense = expenses::get_expense(conn, user_id, id)?
        .ok_or_else(|| AppError::NotFound("Expense not found".into()))?;

    if let Some(description) = &update.description {
        expense.description = Some(description.clone());
    }
    if let Some(amount_cents) = update.amount_cents {
        expense.amount_cents = amount_cents;
    }
    if let Some(category) = &update.category {
        expense.category = category.clone();
    }
    if let Some(date) = &update.date {
        expense.date = normalize_datetime(date)?;
    }

    if !expenses::update_expense(conn, &expense)? {
        return Err(AppError::NotFound("Expense not found".into()));
    }
    Ok(expense)
}

pub fn delete_expense(conn: &Connection, user_id: &str, id: i64) -> AppResult<()> {
    if !expenses::delete_expense(conn, user_id, id)? {
        return Err(AppError::NotFound("Expense not found".into()));
    }
    Ok(())
}

/// Irreversible bulk delete of every expense for the user; returns the
/// removed count.
pub fn delete_all_expenses(conn: &Connection, user_id: &str) -> AppResult<usize> {
    Ok(expenses::delete_all_expenses(conn, user_id)?)
}

pub fn list_incomes(conn: &Connection, user_id: &str) -> AppResult<Vec<Income>> {
    Ok(incomes::list_incomes(conn, user_id)?)
}

pub fn add_income(conn: &Connection, user_id: &str, new: &NewIncome) -> AppResult<Income> {
    let record = NewIncome {
        date: normalize_datetime(&new.date)?,
        ..new.clone()
    };

    let id = incomes::create_income(conn, user_id, &record)?;
    incomes::get_income(conn, user_id, id)?
        .ok_or_else(|| AppError::Internal("Income vanished after insert".into()))
}

pub fn update_income(
    conn: &Connection,
    user_id: &str,
    id: i64,
    update: &IncomeUpdate,
) -> AppResult<Income> {
    let mut income = incomes::get_income(conn, user_id, id)?
        .ok_or_else(|| AppError::NotFound("Income not found".into()))?;

    if let Some(source) = &update.source {
        income.source = source.clone();
    }
    if let Some(amount_cents) = update.amount_cents {
        income.amount_cents = amount_cents;
    }
    if let Some(date) = &update.date {
        income.date = normalize_datetime(date)?;
    }

    if !incomes::update_income(conn, &income)? {
        return Err(AppError::NotFound("Income not found".into()));
    }
    Ok(income)
}

pub fn delete_income(conn: &Connection, user_id: &str, id: i64) -> AppResult<()> {
    if !incomes::delete_income(conn, user_id, id)? {
        return Err(AppError::NotFound("Income not found".into()));
    }
    Ok(())
}
