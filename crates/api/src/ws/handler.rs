use axum::extract::ws::rejection::WebSocketUpgradeRejection;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use edupass_core::error::CoreError;
use edupass_core::notifications::Audience;
use edupass_core::types::DbId;
use edupass_events::{ChangeEvent, FeedSubscription};
use futures::{SinkExt, StreamExt};

use crate::error::AppError;
use crate::middleware::auth::AuthUser;
use crate::query::TokenParam;
use crate::state::AppState;
use crate::ws::frame::WsFrame;

/// Table whose changes are pushed to clients.
const NOTIFICATIONS_TABLE: &str = "notifications";

/// GET /api/v1/ws?token=<jwt>
///
/// Browsers cannot set headers on a WebSocket upgrade, so the session
/// token travels in the query string. The token is checked before the
/// upgrade headers, so an unauthenticated caller always sees 401.
pub async fn ws_handler(
    State(state): State<AppState>,
    Query(params): Query<TokenParam>,
    ws: Result<WebSocketUpgrade, WebSocketUpgradeRejection>,
) -> Response {
    let user = match authenticate(params.token.as_deref(), &state) {
        Ok(user) => user,
        Err(e) => return e.into_response(),
    };

    match ws {
        Ok(ws) => ws
            .on_upgrade(move |socket| handle_socket(socket, state, user))
            .into_response(),
        Err(rejection) => rejection.into_response(),
    }
}

fn authenticate(token: Option<&str>, state: &AppState) -> Result<AuthUser, AppError> {
    let token = token.ok_or_else(|| {
        AppError::Core(CoreError::Unauthorized("Missing token query parameter".into()))
    })?;
    AuthUser::from_token(token, &state.config.jwt)
}

/// Manage a single WebSocket connection after upgrade.
///
/// The connection owns a feed subscription for the notifications table.
/// The subscription lives on this task's stack, so every exit path
/// (client close, socket error, bus shutdown) releases it.
async fn handle_socket(socket: WebSocket, state: AppState, user: AuthUser) {
    let conn_id = uuid::Uuid::new_v4().to_string();
    tracing::info!(conn_id = %conn_id, user_id = user.user_id, "WebSocket connected");

    let mut rx = state.ws_manager.add(conn_id.clone(), user.user_id).await;
    let mut feed: FeedSubscription = state.event_bus.subscribe_table(NOTIFICATIONS_TABLE);

    let (mut sink, mut stream) = socket.split();

    // Sender task: forward channel messages to the WebSocket sink.
    let sender_conn_id = conn_id.clone();
    let send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            let closing = matches!(msg, Message::Close(_));
            if sink.send(msg).await.is_err() || closing {
                tracing::debug!(conn_id = %sender_conn_id, "WebSocket sink closed");
                break;
            }
        }
    });

    loop {
        tokio::select! {
            inbound = stream.next() => match inbound {
                Some(Ok(Message::Close(_))) | None => break,
                Some(Ok(Message::Pong(_))) => {
                    tracing::trace!(conn_id = %conn_id, "Pong received");
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    tracing::debug!(conn_id = %conn_id, error = %e, "WebSocket receive error");
                    break;
                }
            },
            change = feed.recv() => match change {
                Some(event) => {
                    if is_visible(&event, user.user_id) {
                        let frame = WsFrame::from_change(&event).to_message();
                        if !state.ws_manager.send_to(&conn_id, frame).await {
                            break;
                        }
                    }
                }
                None => break,
            },
        }
    }

    drop(feed);
    state.ws_manager.remove(&conn_id).await;
    send_task.abort();
    tracing::info!(conn_id = %conn_id, user_id = user.user_id, "WebSocket disconnected");
}

/// A notification row is pushed to its owner, or to everyone when it has none.
fn is_visible(event: &ChangeEvent, viewer: DbId) -> bool {
    let owner = event
        .record
        .get("user_id")
        .and_then(serde_json::Value::as_i64);
    Audience::from_owner(owner).includes(viewer)
}
