//! Handlers for the `/notifications` resource and its admin counterpart.
//!
//! Every mutation publishes a [`ChangeEvent`] so open WebSocket connections
//! can update their unread badge without polling.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use edupass_core::error::CoreError;
use edupass_core::pagination::{clamp_limit, clamp_offset};
use edupass_core::types::DbId;
use edupass_db::models::notification::{CreateNotification, Notification};
use edupass_db::repositories::NotificationRepo;
use edupass_events::ChangeEvent;
use serde::{Deserialize, Serialize};
use serde_json::json;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Table name carried on published change events.
const TABLE: &str = "notifications";

/// Maximum page size for notification listing.
const MAX_LIMIT: i64 = 100;

/// Default page size for notification listing.
const DEFAULT_LIMIT: i64 = 50;

/// Query parameters for `GET /notifications`.
#[derive(Debug, Deserialize)]
pub struct NotificationQuery {
    /// If `true`, return only unread notifications.
    #[serde(default)]
    pub unread_only: bool,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct UnreadCount {
    pub count: i64,
}

#[derive(Debug, Serialize)]
pub struct MarkedRead {
    pub marked_read: u64,
}

// ---------------------------------------------------------------------------
// Student endpoints
// ---------------------------------------------------------------------------

/// GET /api/v1/notifications
///
/// Own and broadcast notifications, newest first.
pub async fn list_notifications(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<NotificationQuery>,
) -> AppResult<Json<DataResponse<Vec<Notification>>>> {
    let limit = clamp_limit(params.limit, DEFAULT_LIMIT, MAX_LIMIT);
    let offset = clamp_offset(params.offset);

    let notifications = NotificationRepo::list_for_user(
        &state.pool,
        auth.user_id,
        params.unread_only,
        limit,
        offset,
    )
    .await?;

    Ok(Json(DataResponse {
        data: notifications,
    }))
}

/// GET /api/v1/notifications/unread-count
pub async fn unread_count(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<UnreadCount>>> {
    let count = NotificationRepo::unread_count(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse {
        data: UnreadCount { count },
    }))
}

/// POST /api/v1/notifications/{id}/read
///
/// 404 if the notification is not visible to the caller.
pub async fn mark_read(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(notification_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Notification>>> {
    let notification = NotificationRepo::mark_read(&state.pool, notification_id, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Notification",
            id: notification_id,
        }))?;

    state
        .event_bus
        .publish(ChangeEvent::update(TABLE, &notification));

    Ok(Json(DataResponse { data: notification }))
}

/// POST /api/v1/notifications/read-all
///
/// The change event is addressed to the caller, or to everyone when a
/// broadcast row was flipped. Receivers refetch their count on update.
pub async fn mark_all_read(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<MarkedRead>>> {
    let outcome = NotificationRepo::mark_all_read(&state.pool, auth.user_id).await?;

    if outcome.marked > 0 {
        state.event_bus.publish(ChangeEvent::update(
            TABLE,
            &json!({
                "user_id": outcome.audience(auth.user_id).owner(),
                "marked_read": outcome.marked,
            }),
        ));
    }

    Ok(Json(DataResponse {
        data: MarkedRead {
            marked_read: outcome.marked,
        },
    }))
}

// ---------------------------------------------------------------------------
// Admin endpoints
// ---------------------------------------------------------------------------

/// POST /api/v1/admin/notifications
///
/// Omit `user_id` to broadcast to every student.
pub async fn create_notification(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateNotification>,
) -> AppResult<(StatusCode, Json<DataResponse<Notification>>)> {
    input.validate()?;

    let notification = NotificationRepo::create(&state.pool, &input).await?;
    tracing::info!(
        admin_id = admin.user_id,
        notification_id = notification.id,
        audience = ?notification.audience(),
        "Notification created"
    );

    state
        .event_bus
        .publish(ChangeEvent::insert(TABLE, &notification));

    Ok((
        StatusCode::CREATED,
        Json(DataResponse { data: notification }),
    ))
}

/// DELETE /api/v1/admin/notifications/{id}
pub async fn delete_notification(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(notification_id): Path<DbId>,
) -> AppResult<StatusCode> {
    let removed = NotificationRepo::delete(&state.pool, notification_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Notification",
            id: notification_id,
        }))?;

    state.event_bus.publish(ChangeEvent::delete(TABLE, &removed));

    Ok(StatusCode::NO_CONTENT)
}
