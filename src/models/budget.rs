use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Budget {
    pub id: i64,
    pub user_id: String,
    /// Category label by value; kept in sync with renames by the cascade,
    /// removed when the category is deleted.
    pub category: String,
    pub limit_cents: i64,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewBudget {
    pub category: String,
    pub limit_cents: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BudgetUpdate {
    pub category: Option<String>,
    pub limit_cents: Option<i64>,
}
