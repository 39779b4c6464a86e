//! Batch entity model and DTOs.

use chrono::NaiveDate;
use edupass_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A batch row from the `batches` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Batch {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    /// One of `ongoing`, `upcoming`, `completed`.
    pub status: String,
    pub tags: Vec<String>,
    pub start_date: Option<NaiveDate>,
    pub thumbnail_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new batch.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateBatch {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub description: Option<String>,
    /// Defaults to `upcoming` if omitted.
    pub status: Option<String>,
    pub tags: Option<Vec<String>>,
    pub start_date: Option<NaiveDate>,
    #[validate(url)]
    pub thumbnail_url: Option<String>,
}

/// DTO for updating an existing batch. All fields are optional.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateBatch {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub tags: Option<Vec<String>>,
    pub start_date: Option<NaiveDate>,
    #[validate(url)]
    pub thumbnail_url: Option<String>,
}
