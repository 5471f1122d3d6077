use serde::{Deserialize, Serialize};

/// Minimal profile row behind the opaque external user id. Identity
/// issuance lives elsewhere; this record only carries what the ledger
/// needs: the one-time seed flag, the report email address, and the
/// legacy free-text category list kept for early ledger entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub custom_categories: Vec<String>,
    pub categories_seeded: bool,
    pub created_at: String,
    pub updated_at: String,
}
