//! Category taxonomy operations. Every mutation returns the refreshed
//! category list for the (user, kind) scope, matching the external
//! contract.

use rusqlite::Connection;

use crate::db::queries::{categories, users};
use crate::error::{AppError, AppResult};
use crate::models::category::{Category, CategoryKind, NewCategory};
use crate::services::cascade;

pub fn list(conn: &Connection, user_id: &str, kind: CategoryKind) -> AppResult<Vec<Category>> {
    Ok(categories::list_categories(conn, user_id, kind)?)
}

pub fn add(
    conn: &Connection,
    user_id: &str,
    kind: CategoryKind,
    name: &str,
) -> AppResult<Vec<Category>> {
    let name = required_name(name)?;

    if categories::find_category(conn, user_id, kind, name)?.is_some() {
        return Err(AppError::DuplicateCategory(name.to_string()));
    }

    categories::create_category(
        conn,
        user_id,
        &NewCategory {
            name: name.to_string(),
            kind,
            is_default: false,
        },
    )?;

    list(conn, user_id, kind)
}

/// Rename a category and propagate the new label into dependent ledger
/// and budget rows. Fails before any write if the old name is missing or
/// the new name is already taken for this (user, kind).
pub fn rename(
    conn: &Connection,
    user_id: &str,
    kind: CategoryKind,
    old_name: &str,
    new_name: &str,
) -> AppResult<Vec<Category>> {
    if old_name.trim().is_empty() || new_name.trim().is_empty() {
        return Err(AppError::Validation(
            "Both old and new category names are required".into(),
        ));
    }
    let new_name = new_name.trim();

    let category = categories::find_category(conn, user_id, kind, old_name)?
        .ok_or_else(|| AppError::NotFound("Category not found".into()))?;

    if categories::find_category(conn, user_id, kind, new_name)?.is_some() {
        return Err(AppError::DuplicateCategory(new_name.to_string()));
    }

    categories::rename_category(conn, category.id, new_name)?;
    cascade::apply_rename(conn, user_id, kind, old_name, new_name)?;

    list(conn, user_id, kind)
}

/// Delete a category. Budgets for the label are cascaded away; ledger
/// entries keep the now-orphaned label.
pub fn delete(
    conn: &Connection,
    user_id: &str,
    kind: CategoryKind,
    name: &str,
) -> AppResult<Vec<Category>> {
    let name = required_name(name)?;

    if !categories::delete_category(conn, user_id, kind, name)? {
        return Err(AppError::NotFound("Category not found".into()));
    }

    cascade::apply_delete(conn, user_id, kind, name)?;

    list(conn, user_id, kind)
}

fn required_name(name: &str) -> AppResult<&str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation("Category name is required".into()));
    }
    Ok(trimmed)
}

// Legacy free-text category list on the user profile. Kept alongside the
// structured taxonomy because early ledger entries reference these names
// directly; renames cascade into expense rows only.

pub fn list_custom(conn: &Connection, user_id: &str) -> AppResult<Vec<String>> {
    let profile = users::get_profile(conn, user_id)?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;
    Ok(profile.custom_categories)
}

pub fn add_custom(conn: &Connection, user_id: &str, name: &str) -> AppResult<Vec<String>> {
    let name = required_name(name)?;

    let mut custom = list_custom(conn, user_id)?;
    if custom.iter().any(|c| c == name) {
        return Err(AppError::DuplicateCategory(name.to_string()));
    }

    custom.push(name.to_string());
    users::set_custom_categories(conn, user_id, &custom)?;
    Ok(custom)
}

pub fn rename_custom(
    conn: &Connection,
    user_id: &str,
    old_name: &str,
    new_name: &str,
) -> AppResult<Vec<String>> {
    if old_name.trim().is_empty() || new_name.trim().is_empty() {
        return Err(AppError::Validation(
            "Both old and new category names are required".into(),
        ));
    }
    let new_name = new_name.trim();

    let mut custom = list_custom(conn, user_id)?;
    let index = custom
        .iter()
        .position(|c| c == old_name)
        .ok_or_else(|| AppError::NotFound("Category not found".into()))?;

    if custom.iter().any(|c| c == new_name) {
        return Err(AppError::DuplicateCategory(new_name.to_string()));
    }

    custom[index] = new_name.to_string();
    users::set_custom_categories(conn, user_id, &custom)?;
    cascade::apply_legacy_rename(conn, user_id, old_name, new_name)?;

    Ok(custom)
}
