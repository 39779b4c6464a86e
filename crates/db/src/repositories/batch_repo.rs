//! Repository for the `batches` table.

use edupass_core::types::DbId;
use sqlx::PgPool;

use crate::models::batch::{Batch, CreateBatch, UpdateBatch};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, name, description, status, tags, start_date, thumbnail_url, created_at, updated_at";

/// Provides CRUD operations for batches.
pub struct BatchRepo;

impl BatchRepo {
    /// Insert a new batch, returning the created row.
    ///
    /// Status defaults to `upcoming` and tags to an empty list.
    pub async fn create(pool: &PgPool, input: &CreateBatch) -> Result<Batch, sqlx::Error> {
        let query = format!(
            "INSERT INTO batches (name, description, status, tags, start_date, thumbnail_url)
             VALUES ($1, $2, COALESCE($3, 'upcoming'), COALESCE($4, '{{}}'::TEXT[]), $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Batch>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.status)
            .bind(&input.tags)
            .bind(input.start_date)
            .bind(&input.thumbnail_url)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Batch>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM batches WHERE id = $1");
        sqlx::query_as::<_, Batch>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List batches, optionally filtered by status, newest first.
    pub async fn list(pool: &PgPool, status: Option<&str>) -> Result<Vec<Batch>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM batches
             WHERE ($1::TEXT IS NULL OR status = $1)
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Batch>(&query)
            .bind(status)
            .fetch_all(pool)
            .await
    }

    /// Update a batch. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateBatch,
    ) -> Result<Option<Batch>, sqlx::Error> {
        let query = format!(
            "UPDATE batches SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                status = COALESCE($4, status),
                tags = COALESCE($5, tags),
                start_date = COALESCE($6, start_date),
                thumbnail_url = COALESCE($7, thumbnail_url)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Batch>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.status)
            .bind(&input.tags)
            .bind(input.start_date)
            .bind(&input.thumbnail_url)
            .fetch_optional(pool)
            .await
    }

    /// Delete a batch along with its lectures and timetable entries.
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM batches WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
