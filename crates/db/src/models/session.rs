//! Refresh-token sessions.

use edupass_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from `user_sessions`. Live while `revoked_at` is unset and
/// `expires_at` lies in the future.
#[derive(Debug, Clone, FromRow)]
pub struct Session {
    pub id: DbId,
    pub user_id: DbId,
    pub refresh_token_hash: String,
    pub user_agent: Option<String>,
    pub expires_at: Timestamp,
    pub revoked_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// Values for a freshly issued refresh token.
pub struct NewSession {
    pub user_id: DbId,
    pub refresh_token_hash: String,
    pub user_agent: Option<String>,
    pub expires_at: Timestamp,
}
