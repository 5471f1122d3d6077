use serde::{Deserialize, Serialize};

use crate::models::expense::format_cents;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Income {
    pub id: i64,
    pub user_id: String,
    /// Source label, a string copy of an income-kind category name.
    pub source: String,
    pub amount_cents: i64,
    pub date: String,
    pub created_at: String,
    pub updated_at: String,
}

impl Income {
    pub fn amount_display(&self) -> String {
        format_cents(self.amount_cents)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewIncome {
    pub source: String,
    pub amount_cents: i64,
    pub date: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct IncomeUpdate {
    pub source: Option<String>,
    pub amount_cents: Option<i64>,
    pub date: Option<String>,
}
