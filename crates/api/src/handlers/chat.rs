//! Handler for the study assistant relay.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use edupass_core::chat::{validate_request, ChatRequest};
use serde::Serialize;

use crate::middleware::auth::AuthUser;
use crate::relay::RelayError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ChatReply {
    pub message: String,
}

/// POST /api/v1/chat
///
/// Answers `{ message }` on success and `{ error }` otherwise, including
/// for bodies that are not a chat request at all.
pub async fn chat(
    auth: AuthUser,
    State(state): State<AppState>,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatReply>, RelayError> {
    let Json(request) = body.map_err(|e| RelayError::InvalidRequest(e.body_text()))?;
    validate_request(&request).map_err(RelayError::InvalidRequest)?;

    tracing::info!(
        user_id = auth.user_id,
        turns = request.messages.len(),
        has_image = request.image().is_some(),
        "Chat request"
    );

    let message = state.chat.complete(&request).await?;
    Ok(Json(ChatReply { message }))
}
