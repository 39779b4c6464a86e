pub mod access;
pub mod admin;
pub mod auth;
pub mod batch;
pub mod chat;
pub mod health;
pub mod lecture;
pub mod notification;

use axum::routing::get;
use axum::Router;

use crate::state::AppState;
use crate::ws;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /ws?token=<jwt>                       WebSocket (notification feed)
///
/// /auth/signup                          signup (public)
/// /auth/login                           login (public)
/// /auth/refresh                         refresh (public)
/// /auth/logout                          logout (requires auth)
/// /auth/me                              current user
/// /auth/gate                            admin gate state
///
/// /access/grant                         issue 24h grant (POST)
/// /access/check                         check status (POST)
/// /access/request                       mint verification link (POST)
/// /access/verify                        redeem verification token (POST)
///
/// /notifications                        list (?unread_only, limit, offset)
/// /notifications/unread-count           unread count (GET)
/// /notifications/read-all               mark all read (POST)
/// /notifications/{id}/read              mark read (POST)
///
/// /batches                              list (?status)
/// /batches/{id}                         get
/// /batches/{id}/lectures                lectures of a batch
/// /batches/{id}/timetable               timetable of a batch
///
/// /lectures/{id}                        get
/// /lectures/{id}/playback               resource URLs (grant-gated)
///
/// /chat                                 study assistant relay (POST)
///
/// /admin/batches                        create (admin only)
/// /admin/batches/{id}                   update, delete
/// /admin/lectures                       create
/// /admin/lectures/{id}                  update, delete
/// /admin/timetable                      create
/// /admin/timetable/{id}                 update, delete
/// /admin/notifications                  create (user_id null = broadcast)
/// /admin/notifications/{id}             delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // WebSocket endpoint.
        .route("/ws", get(ws::ws_handler))
        // Accounts, sessions and the admin gate.
        .nest("/auth", auth::router())
        // Timed content access.
        .nest("/access", access::router())
        // Notification inbox.
        .nest("/notifications", notification::router())
        // Catalog reads.
        .nest("/batches", batch::router())
        .nest("/lectures", lecture::router())
        // Study assistant.
        .nest("/chat", chat::router())
        // Admin CRUD.
        .nest("/admin", admin::router())
}
