//! Repository for the `access_requests` table.

use edupass_core::types::DbId;
use sqlx::PgPool;

use crate::models::access::{AccessRequest, CreateAccessRequest};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, token_hash, expires_at, consumed_at, created_at";

/// Provides CRUD operations for pending verification links.
pub struct AccessRequestRepo;

impl AccessRequestRepo {
    /// Insert a new pending request, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateAccessRequest,
    ) -> Result<AccessRequest, sqlx::Error> {
        let query = format!(
            "INSERT INTO access_requests (user_id, token_hash, expires_at)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AccessRequest>(&query)
            .bind(input.user_id)
            .bind(&input.token_hash)
            .bind(input.expires_at)
            .fetch_one(pool)
            .await
    }

    /// Atomically consume a pending request owned by `user_id`.
    ///
    /// Returns `None` when the token is unknown, belongs to someone else,
    /// was already used, or has expired. A token can be consumed once.
    pub async fn consume(
        pool: &PgPool,
        token_hash: &str,
        user_id: DbId,
    ) -> Result<Option<AccessRequest>, sqlx::Error> {
        let query = format!(
            "UPDATE access_requests SET consumed_at = NOW()
             WHERE token_hash = $1
               AND user_id = $2
               AND consumed_at IS NULL
               AND expires_at > NOW()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AccessRequest>(&query)
            .bind(token_hash)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete consumed or expired requests. Returns the number removed.
    pub async fn delete_stale(pool: &PgPool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM access_requests WHERE consumed_at IS NOT NULL OR expires_at < NOW()",
        )
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
