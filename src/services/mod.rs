pub mod ai_client;
pub mod budgets;
pub mod cascade;
pub mod categories;
pub mod ledger;
pub mod report_document;
pub mod reports;
pub mod seed;
