//! Route definitions for the `/admin` resource.
//!
//! Every handler takes [`RequireAdmin`](crate::middleware::rbac::RequireAdmin),
//! so non-admin callers get 403.

use axum::routing::{delete, post, put};
use axum::Router;

use crate::handlers::{batch, lecture, notification, timetable};
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// ```text
/// POST   /batches               -> create_batch
/// PUT    /batches/{id}          -> update_batch
/// DELETE /batches/{id}          -> delete_batch
///
/// POST   /lectures              -> create_lecture
/// PUT    /lectures/{id}         -> update_lecture
/// DELETE /lectures/{id}         -> delete_lecture
///
/// POST   /timetable             -> create_entry
/// PUT    /timetable/{id}        -> update_entry
/// DELETE /timetable/{id}        -> delete_entry
///
/// POST   /notifications         -> create_notification
/// DELETE /notifications/{id}    -> delete_notification
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/batches", post(batch::create_batch))
        .route(
            "/batches/{id}",
            put(batch::update_batch).delete(batch::delete_batch),
        )
        .route("/lectures", post(lecture::create_lecture))
        .route(
            "/lectures/{id}",
            put(lecture::update_lecture).delete(lecture::delete_lecture),
        )
        .route("/timetable", post(timetable::create_entry))
        .route(
            "/timetable/{id}",
            put(timetable::update_entry).delete(timetable::delete_entry),
        )
        .route("/notifications", post(notification::create_notification))
        .route(
            "/notifications/{id}",
            delete(notification::delete_notification),
        )
}
