//! Handlers for `/admin/timetable` (CRUD). Students read the timetable
//! through `GET /batches/{id}/timetable`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use edupass_core::catalog::{validate_day_of_week, validate_time_range};
use edupass_core::error::CoreError;
use edupass_core::types::DbId;
use edupass_db::models::timetable::{CreateTimetableEntry, TimetableEntry, UpdateTimetableEntry};
use edupass_db::repositories::TimetableRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::handlers::batch::find_batch;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/admin/timetable
pub async fn create_entry(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateTimetableEntry>,
) -> AppResult<(StatusCode, Json<DataResponse<TimetableEntry>>)> {
    input.validate()?;
    validate_day_of_week(input.day_of_week).map_err(validation)?;
    validate_time_range(input.start_time, input.end_time).map_err(validation)?;
    find_batch(&state, input.batch_id).await?;

    let entry = TimetableRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: entry })))
}

/// PUT /api/v1/admin/timetable/{id}
///
/// The time range is checked against the merged result, so moving only
/// the start past the stored end is rejected.
pub async fn update_entry(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTimetableEntry>,
) -> AppResult<Json<DataResponse<TimetableEntry>>> {
    input.validate()?;

    let existing = TimetableRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(not_found(id))?;
    validate_time_range(
        input.start_time.unwrap_or(existing.start_time),
        input.end_time.unwrap_or(existing.end_time),
    )
    .map_err(validation)?;

    let entry = TimetableRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(not_found(id))?;
    Ok(Json(DataResponse { data: entry }))
}

/// DELETE /api/v1/admin/timetable/{id}
pub async fn delete_entry(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !TimetableRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    Ok(StatusCode::NO_CONTENT)
}

fn validation(msg: String) -> AppError {
    AppError::Core(CoreError::Validation(msg))
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "TimetableEntry",
        id,
    })
}
