//! Handlers for `/batches` (student reads) and `/admin/batches` (CRUD).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use edupass_core::catalog::BatchStatus;
use edupass_core::error::CoreError;
use edupass_core::types::DbId;
use edupass_db::models::batch::{Batch, CreateBatch, UpdateBatch};
use edupass_db::models::timetable::TimetableEntry;
use edupass_db::repositories::{BatchRepo, LectureRepo, TimetableRepo};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::handlers::lecture::LectureView;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct BatchQuery {
    pub status: Option<String>,
}

/// A batch with its display badge colour.
#[derive(Debug, Serialize)]
pub struct BatchView {
    #[serde(flatten)]
    pub batch: Batch,
    pub badge_color: &'static str,
}

impl From<Batch> for BatchView {
    fn from(batch: Batch) -> Self {
        let badge_color = BatchStatus::parse(&batch.status)
            .map(BatchStatus::badge_color)
            .unwrap_or("gray");
        Self { batch, badge_color }
    }
}

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

/// GET /api/v1/batches?status=
pub async fn list_batches(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<BatchQuery>,
) -> AppResult<Json<DataResponse<Vec<BatchView>>>> {
    check_status(params.status.as_deref())?;
    let batches = BatchRepo::list(&state.pool, params.status.as_deref()).await?;
    Ok(Json(DataResponse {
        data: batches.into_iter().map(BatchView::from).collect(),
    }))
}

/// GET /api/v1/batches/{id}
pub async fn get_batch(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<BatchView>>> {
    let batch = find_batch(&state, id).await?;
    Ok(Json(DataResponse { data: batch.into() }))
}

/// GET /api/v1/batches/{id}/lectures
///
/// Resource URLs of locked lectures are withheld; use the playback endpoint.
pub async fn list_batch_lectures(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<LectureView>>>> {
    find_batch(&state, id).await?;
    let lectures = LectureRepo::list_by_batch(&state.pool, id).await?;
    Ok(Json(DataResponse {
        data: lectures.into_iter().map(LectureView::from).collect(),
    }))
}

/// GET /api/v1/batches/{id}/timetable
pub async fn get_batch_timetable(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<TimetableEntry>>>> {
    find_batch(&state, id).await?;
    let entries = TimetableRepo::list_by_batch(&state.pool, id).await?;
    Ok(Json(DataResponse { data: entries }))
}

// ---------------------------------------------------------------------------
// Admin CRUD
// ---------------------------------------------------------------------------

/// POST /api/v1/admin/batches
pub async fn create_batch(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateBatch>,
) -> AppResult<(StatusCode, Json<DataResponse<BatchView>>)> {
    input.validate()?;
    check_status(input.status.as_deref())?;

    let batch = BatchRepo::create(&state.pool, &input).await?;
    tracing::info!(admin_id = admin.user_id, batch_id = batch.id, "Batch created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: batch.into() })))
}

/// PUT /api/v1/admin/batches/{id}
pub async fn update_batch(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateBatch>,
) -> AppResult<Json<DataResponse<BatchView>>> {
    input.validate()?;
    check_status(input.status.as_deref())?;

    let batch = BatchRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Batch",
            id,
        }))?;
    Ok(Json(DataResponse { data: batch.into() }))
}

/// DELETE /api/v1/admin/batches/{id}
///
/// Cascades to the batch's lectures and timetable.
pub async fn delete_batch(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !BatchRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Batch",
            id,
        }));
    }
    tracing::info!(admin_id = admin.user_id, batch_id = id, "Batch deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

pub(crate) async fn find_batch(state: &AppState, id: DbId) -> AppResult<Batch> {
    BatchRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Batch",
            id,
        }))
}

fn check_status(status: Option<&str>) -> AppResult<()> {
    if let Some(status) = status {
        BatchStatus::parse(status).map_err(|e| AppError::Core(CoreError::Validation(e)))?;
    }
    Ok(())
}
