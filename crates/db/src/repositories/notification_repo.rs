//! Repository for the `notifications` table.
//!
//! A viewer sees their own rows plus broadcast rows (`user_id IS NULL`).

use edupass_core::types::DbId;
use sqlx::PgPool;

use crate::models::notification::{CreateNotification, Notification, ReadAll};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, title, message, is_read, read_at, created_at, updated_at";

/// Visibility predicate for viewer `$1`.
const VISIBLE_TO: &str = "(user_id = $1 OR user_id IS NULL)";

/// Provides CRUD operations for notifications.
pub struct NotificationRepo;

impl NotificationRepo {
    /// Insert a notification, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateNotification,
    ) -> Result<Notification, sqlx::Error> {
        let query = format!(
            "INSERT INTO notifications (user_id, title, message)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Notification>(&query)
            .bind(input.user_id)
            .bind(&input.title)
            .bind(&input.message)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<Notification>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM notifications WHERE id = $1");
        sqlx::query_as::<_, Notification>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List notifications visible to a user, newest first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
        unread_only: bool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Notification>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM notifications
             WHERE {VISIBLE_TO}
               AND ($2 = false OR is_read = false)
             ORDER BY created_at DESC, id DESC
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, Notification>(&query)
            .bind(user_id)
            .bind(unread_only)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Count unread notifications visible to a user.
    pub async fn unread_count(pool: &PgPool, user_id: DbId) -> Result<i64, sqlx::Error> {
        let query =
            format!("SELECT COUNT(*) FROM notifications WHERE {VISIBLE_TO} AND is_read = false");
        sqlx::query_scalar(&query).bind(user_id).fetch_one(pool).await
    }

    /// Mark one visible notification as read.
    ///
    /// Returns the updated row, or `None` if it does not exist or is not
    /// visible to the user.
    pub async fn mark_read(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<Notification>, sqlx::Error> {
        let query = format!(
            "UPDATE notifications SET is_read = true, read_at = COALESCE(read_at, NOW())
             WHERE id = $2 AND {VISIBLE_TO}
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Notification>(&query)
            .bind(user_id)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Mark every unread notification visible to a user as read.
    pub async fn mark_all_read(pool: &PgPool, user_id: DbId) -> Result<ReadAll, sqlx::Error> {
        let query = format!(
            "UPDATE notifications SET is_read = true, read_at = NOW()
             WHERE {VISIBLE_TO} AND is_read = false
             RETURNING user_id"
        );
        let owners: Vec<Option<DbId>> = sqlx::query_scalar(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await?;
        Ok(ReadAll {
            marked: owners.len() as u64,
            broadcast_touched: owners.iter().any(Option::is_none),
        })
    }

    /// Delete a notification. Returns the removed row.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<Option<Notification>, sqlx::Error> {
        let query = format!("DELETE FROM notifications WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Notification>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
