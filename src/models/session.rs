//! Login session (issued-token ledger) model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One row per issued bearer token. Logout deletes the rows for the token;
/// expired rows are pruned opportunistically at login.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct LoginSession {
    pub id: i32,
    pub user_id: i32,
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}
