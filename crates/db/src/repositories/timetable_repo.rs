//! Repository for the `timetable_entries` table.

use edupass_core::types::DbId;
use sqlx::PgPool;

use crate::models::timetable::{CreateTimetableEntry, TimetableEntry, UpdateTimetableEntry};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, batch_id, lecture_id, day_of_week, start_time, end_time, \
                        subject, teacher, created_at, updated_at";

/// Provides CRUD operations for timetable entries.
pub struct TimetableRepo;

impl TimetableRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateTimetableEntry,
    ) -> Result<TimetableEntry, sqlx::Error> {
        let query = format!(
            "INSERT INTO timetable_entries
                (batch_id, lecture_id, day_of_week, start_time, end_time, subject, teacher)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TimetableEntry>(&query)
            .bind(input.batch_id)
            .bind(input.lecture_id)
            .bind(input.day_of_week)
            .bind(input.start_time)
            .bind(input.end_time)
            .bind(&input.subject)
            .bind(&input.teacher)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<TimetableEntry>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM timetable_entries WHERE id = $1");
        sqlx::query_as::<_, TimetableEntry>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Weekly schedule for a batch, ordered by day then start time.
    pub async fn list_by_batch(
        pool: &PgPool,
        batch_id: DbId,
    ) -> Result<Vec<TimetableEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM timetable_entries
             WHERE batch_id = $1
             ORDER BY day_of_week ASC, start_time ASC"
        );
        sqlx::query_as::<_, TimetableEntry>(&query)
            .bind(batch_id)
            .fetch_all(pool)
            .await
    }

    /// Update an entry. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTimetableEntry,
    ) -> Result<Option<TimetableEntry>, sqlx::Error> {
        let query = format!(
            "UPDATE timetable_entries SET
                lecture_id = COALESCE($2, lecture_id),
                day_of_week = COALESCE($3, day_of_week),
                start_time = COALESCE($4, start_time),
                end_time = COALESCE($5, end_time),
                subject = COALESCE($6, subject),
                teacher = COALESCE($7, teacher)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TimetableEntry>(&query)
            .bind(id)
            .bind(input.lecture_id)
            .bind(input.day_of_week)
            .bind(input.start_time)
            .bind(input.end_time)
            .bind(&input.subject)
            .bind(&input.teacher)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM timetable_entries WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
