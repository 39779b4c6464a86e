//! Repository for the `lectures` table.

use edupass_core::types::DbId;
use sqlx::PgPool;

use crate::models::lecture::{CreateLecture, Lecture, UpdateLecture};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, batch_id, title, description, video_type, video_url, notes_url, \
                        dpp_url, is_locked, scheduled_at, sort_order, created_at, updated_at";

/// Provides CRUD operations for lectures.
pub struct LectureRepo;

impl LectureRepo {
    /// Insert a new lecture, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateLecture) -> Result<Lecture, sqlx::Error> {
        let query = format!(
            "INSERT INTO lectures
                (batch_id, title, description, video_type, video_url, notes_url, dpp_url,
                 is_locked, scheduled_at, sort_order)
             VALUES ($1, $2, $3, COALESCE($4, 'recorded'), $5, $6, $7,
                     COALESCE($8, false), $9, COALESCE($10, 0))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Lecture>(&query)
            .bind(input.batch_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.video_type)
            .bind(&input.video_url)
            .bind(&input.notes_url)
            .bind(&input.dpp_url)
            .bind(input.is_locked)
            .bind(input.scheduled_at)
            .bind(input.sort_order)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Lecture>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM lectures WHERE id = $1");
        sqlx::query_as::<_, Lecture>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List lectures for a batch in display order.
    pub async fn list_by_batch(
        pool: &PgPool,
        batch_id: DbId,
    ) -> Result<Vec<Lecture>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM lectures
             WHERE batch_id = $1
             ORDER BY sort_order ASC, id ASC"
        );
        sqlx::query_as::<_, Lecture>(&query)
            .bind(batch_id)
            .fetch_all(pool)
            .await
    }

    /// Update a lecture. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateLecture,
    ) -> Result<Option<Lecture>, sqlx::Error> {
        let query = format!(
            "UPDATE lectures SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                video_type = COALESCE($4, video_type),
                video_url = COALESCE($5, video_url),
                notes_url = COALESCE($6, notes_url),
                dpp_url = COALESCE($7, dpp_url),
                is_locked = COALESCE($8, is_locked),
                scheduled_at = COALESCE($9, scheduled_at),
                sort_order = COALESCE($10, sort_order)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Lecture>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.video_type)
            .bind(&input.video_url)
            .bind(&input.notes_url)
            .bind(&input.dpp_url)
            .bind(input.is_locked)
            .bind(input.scheduled_at)
            .bind(input.sort_order)
            .fetch_optional(pool)
            .await
    }

    /// Delete a lecture. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM lectures WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
