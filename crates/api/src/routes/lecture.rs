use axum::routing::get;
use axum::Router;

use crate::handlers::lecture;
use crate::state::AppState;

/// Routes mounted at `/lectures`.
///
/// ```text
/// GET /{id}           -> get_lecture
/// GET /{id}/playback  -> get_playback
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{id}", get(lecture::get_lecture))
        .route("/{id}/playback", get(lecture::get_playback))
}
