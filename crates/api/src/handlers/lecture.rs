//! Handlers for `/lectures` (reads and gated playback) and
//! `/admin/lectures` (CRUD).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use edupass_core::catalog::VideoType;
use edupass_core::error::CoreError;
use edupass_core::types::{DbId, Timestamp};
use edupass_db::models::lecture::{CreateLecture, Lecture, UpdateLecture};
use edupass_db::repositories::{AccessGrantRepo, LectureRepo};
use serde::Serialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::handlers::batch::find_batch;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{is_admin, RequireAdmin};
use crate::response::DataResponse;
use crate::state::AppState;

/// Lecture as listed to students. Locked lectures carry no resource URLs.
#[derive(Debug, Serialize)]
pub struct LectureView {
    pub id: DbId,
    pub batch_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub video_type: String,
    pub video_url: Option<String>,
    pub notes_url: Option<String>,
    pub dpp_url: Option<String>,
    pub is_locked: bool,
    pub scheduled_at: Option<Timestamp>,
    pub sort_order: i32,
}

impl From<Lecture> for LectureView {
    fn from(lecture: Lecture) -> Self {
        let open = !lecture.is_locked;
        Self {
            id: lecture.id,
            batch_id: lecture.batch_id,
            title: lecture.title,
            description: lecture.description,
            video_type: lecture.video_type,
            video_url: lecture.video_url.filter(|_| open),
            notes_url: lecture.notes_url.filter(|_| open),
            dpp_url: lecture.dpp_url.filter(|_| open),
            is_locked: lecture.is_locked,
            scheduled_at: lecture.scheduled_at,
            sort_order: lecture.sort_order,
        }
    }
}

/// Resource URLs for an entitled viewer.
#[derive(Debug, Serialize)]
pub struct Playback {
    pub lecture_id: DbId,
    pub video_type: String,
    pub video_url: Option<String>,
    pub notes_url: Option<String>,
    pub dpp_url: Option<String>,
}

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

/// GET /api/v1/lectures/{id}
pub async fn get_lecture(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<LectureView>>> {
    let lecture = find_lecture(&state, id).await?;
    Ok(Json(DataResponse {
        data: lecture.into(),
    }))
}

/// GET /api/v1/lectures/{id}/playback
///
/// Locked lectures require an active access grant (admins are exempt).
pub async fn get_playback(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Playback>>> {
    let lecture = find_lecture(&state, id).await?;

    if lecture.is_locked
        && !is_admin(&state, &auth).await?
        && !AccessGrantRepo::has_active(&state.pool, auth.user_id).await?
    {
        return Err(AppError::Core(CoreError::Forbidden(
            "This lecture is locked. Complete verification to unlock access.".into(),
        )));
    }

    Ok(Json(DataResponse {
        data: Playback {
            lecture_id: lecture.id,
            video_type: lecture.video_type,
            video_url: lecture.video_url,
            notes_url: lecture.notes_url,
            dpp_url: lecture.dpp_url,
        },
    }))
}

// ---------------------------------------------------------------------------
// Admin CRUD
// ---------------------------------------------------------------------------

/// POST /api/v1/admin/lectures
pub async fn create_lecture(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateLecture>,
) -> AppResult<(StatusCode, Json<DataResponse<Lecture>>)> {
    input.validate()?;
    check_video_type(input.video_type.as_deref())?;
    find_batch(&state, input.batch_id).await?;

    let lecture = LectureRepo::create(&state.pool, &input).await?;
    tracing::info!(
        admin_id = admin.user_id,
        lecture_id = lecture.id,
        batch_id = lecture.batch_id,
        "Lecture created"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: lecture })))
}

/// PUT /api/v1/admin/lectures/{id}
pub async fn update_lecture(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateLecture>,
) -> AppResult<Json<DataResponse<Lecture>>> {
    input.validate()?;
    check_video_type(input.video_type.as_deref())?;

    let lecture = LectureRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Lecture",
            id,
        }))?;
    Ok(Json(DataResponse { data: lecture }))
}

/// DELETE /api/v1/admin/lectures/{id}
pub async fn delete_lecture(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !LectureRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Lecture",
            id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn find_lecture(state: &AppState, id: DbId) -> AppResult<Lecture> {
    LectureRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Lecture",
            id,
        }))
}

fn check_video_type(video_type: Option<&str>) -> AppResult<()> {
    if let Some(video_type) = video_type {
        VideoType::parse(video_type).map_err(|e| AppError::Core(CoreError::Validation(e)))?;
    }
    Ok(())
}
