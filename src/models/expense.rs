use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    pub id: i64,
    pub user_id: String,
    pub description: Option<String>,
    pub amount_cents: i64,
    /// Plain string copy of the category name, not a foreign key. May
    /// outlive the category it was copied from.
    pub category: String,
    pub date: String,
    pub created_at: String,
    pub updated_at: String,
}

impl Expense {
    pub fn amount_display(&self) -> String {
        format_cents(self.amount_cents)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewExpense {
    pub description: Option<String>,
    pub amount_cents: i64,
    pub category: String,
    pub date: String,
}

/// Partial field replace for an existing expense; `None` keeps the
/// stored value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExpenseUpdate {
    pub description: Option<String>,
    pub amount_cents: Option<i64>,
    pub category: Option<String>,
    pub date: Option<String>,
}

/// Convert a decimal amount to integer cents, the storage unit for all
/// sums. Report arithmetic stays exact this way.
pub fn cents_from_decimal(amount: f64) -> i64 {
    (amount * 100.0).round() as i64
}

pub fn format_cents(cents: i64) -> String {
    let is_negative = cents < 0;
    let abs_cents = cents.abs();
    let units = abs_cents / 100;
    let remainder = abs_cents % 100;

    if is_negative {
        format!("-{}.{:02}", units, remainder)
    } else {
        format!("{}.{:02}", units, remainder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimal_round_trips_to_cents() {
        assert_eq!(cents_from_decimal(12.34), 1234);
        assert_eq!(cents_from_decimal(0.1), 10);
        assert_eq!(cents_from_decimal(1000.0), 100_000);
    }

    #[test]
    fn format_pads_cents() {
        assert_eq!(format_cents(1234), "12.34");
        assert_eq!(format_cents(5), "0.05");
        assert_eq!(format_cents(-250), "-2.50");
    }
}
