use axum::routing::get;
use axum::Router;

use crate::handlers::batch;
use crate::state::AppState;

/// Routes mounted at `/batches`.
///
/// ```text
/// GET /                -> list_batches (?status)
/// GET /{id}            -> get_batch
/// GET /{id}/lectures   -> list_batch_lectures
/// GET /{id}/timetable  -> get_batch_timetable
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(batch::list_batches))
        .route("/{id}", get(batch::get_batch))
        .route("/{id}/lectures", get(batch::list_batch_lectures))
        .route("/{id}/timetable", get(batch::get_batch_timetable))
}
