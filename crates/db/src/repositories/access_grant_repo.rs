//! Repository for the `access_grants` table.
//!
//! A user holds at most one grant row. Issuing access replaces the window
//! in place, so repeated or concurrent unlocks never produce duplicates.

use edupass_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::access::AccessGrant;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, granted_at, expires_at, created_at, updated_at";

/// Provides issuance and lookup for access grants.
pub struct AccessGrantRepo;

impl AccessGrantRepo {
    /// Create or replace the grant for `user_id` with the given window.
    pub async fn upsert(
        pool: &PgPool,
        user_id: DbId,
        granted_at: Timestamp,
        expires_at: Timestamp,
    ) -> Result<AccessGrant, sqlx::Error> {
        let query = format!(
            "INSERT INTO access_grants (user_id, granted_at, expires_at)
             VALUES ($1, $2, $3)
             ON CONFLICT (user_id) DO UPDATE SET
                granted_at = EXCLUDED.granted_at,
                expires_at = EXCLUDED.expires_at
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AccessGrant>(&query)
            .bind(user_id)
            .bind(granted_at)
            .bind(expires_at)
            .fetch_one(pool)
            .await
    }

    /// The grant row for a user, expired or not.
    pub async fn find_by_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<AccessGrant>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM access_grants WHERE user_id = $1");
        sqlx::query_as::<_, AccessGrant>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Whether the user holds a grant that has not yet expired.
    pub async fn has_active(pool: &PgPool, user_id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM access_grants WHERE user_id = $1 AND expires_at > NOW())",
        )
        .bind(user_id)
        .fetch_one(pool)
        .await
    }

    /// Delete grants that expired before `cutoff`. Returns the number removed.
    pub async fn delete_expired_before(
        pool: &PgPool,
        cutoff: Timestamp,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM access_grants WHERE expires_at < $1")
            .bind(cutoff)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
