//! Route definitions for the `/access` resource.
//!
//! All endpoints require authentication.

use axum::routing::post;
use axum::Router;

use crate::handlers::access;
use crate::state::AppState;

/// Routes mounted at `/access`.
///
/// ```text
/// POST /grant    -> grant_access
/// POST /check    -> check_access
/// POST /request  -> request_access
/// POST /verify   -> verify_access
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/grant", post(access::grant_access))
        .route("/check", post(access::check_access))
        .route("/request", post(access::request_access))
        .route("/verify", post(access::verify_access))
}
