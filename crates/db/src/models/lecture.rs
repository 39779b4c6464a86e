//! Lecture entity model and DTOs.

use edupass_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A lecture row from the `lectures` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Lecture {
    pub id: DbId,
    pub batch_id: DbId,
    pub title: String,
    pub description: Option<String>,
    /// Either `live` or `recorded`.
    pub video_type: String,
    pub video_url: Option<String>,
    pub notes_url: Option<String>,
    pub dpp_url: Option<String>,
    pub is_locked: bool,
    pub scheduled_at: Option<Timestamp>,
    pub sort_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new lecture.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateLecture {
    pub batch_id: DbId,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub description: Option<String>,
    /// Defaults to `recorded` if omitted.
    pub video_type: Option<String>,
    #[validate(url)]
    pub video_url: Option<String>,
    #[validate(url)]
    pub notes_url: Option<String>,
    #[validate(url)]
    pub dpp_url: Option<String>,
    pub is_locked: Option<bool>,
    pub scheduled_at: Option<Timestamp>,
    pub sort_order: Option<i32>,
}

/// DTO for updating an existing lecture. All fields are optional.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateLecture {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub video_type: Option<String>,
    #[validate(url)]
    pub video_url: Option<String>,
    #[validate(url)]
    pub notes_url: Option<String>,
    #[validate(url)]
    pub dpp_url: Option<String>,
    pub is_locked: Option<bool>,
    pub scheduled_at: Option<Timestamp>,
    pub sort_order: Option<i32>,
}
