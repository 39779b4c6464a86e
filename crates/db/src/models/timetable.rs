//! Timetable entry model and DTOs.

use chrono::NaiveTime;
use edupass_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `timetable_entries` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TimetableEntry {
    pub id: DbId,
    pub batch_id: DbId,
    pub lecture_id: Option<DbId>,
    /// 0 = Sunday .. 6 = Saturday.
    pub day_of_week: i16,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub subject: String,
    pub teacher: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a timetable entry.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTimetableEntry {
    pub batch_id: DbId,
    pub lecture_id: Option<DbId>,
    #[validate(range(min = 0, max = 6))]
    pub day_of_week: i16,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    #[validate(length(min = 1, max = 100))]
    pub subject: String,
    pub teacher: Option<String>,
}

/// DTO for updating a timetable entry. All fields are optional.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateTimetableEntry {
    pub lecture_id: Option<DbId>,
    #[validate(range(min = 0, max = 6))]
    pub day_of_week: Option<i16>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    #[validate(length(min = 1, max = 100))]
    pub subject: Option<String>,
    pub teacher: Option<String>,
}
