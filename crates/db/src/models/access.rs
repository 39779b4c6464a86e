//! Access grant and verification request models.

use edupass_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `access_grants` table. At most one per user.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AccessGrant {
    pub id: DbId,
    pub user_id: DbId,
    pub granted_at: Timestamp,
    pub expires_at: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `access_requests` table.
#[derive(Debug, Clone, FromRow)]
pub struct AccessRequest {
    pub id: DbId,
    pub user_id: DbId,
    pub token_hash: String,
    pub expires_at: Timestamp,
    pub consumed_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// DTO for recording a freshly minted verification token.
pub struct CreateAccessRequest {
    pub user_id: DbId,
    pub token_hash: String,
    pub expires_at: Timestamp,
}
