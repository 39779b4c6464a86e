//! Handlers for the `/access` resource: time-boxed content unlocks.
//!
//! A student unlocks premium playback for a fixed window (24 hours by
//! default). The window is stored as a single grant row per user and
//! mirrored in a signed access token the client may cache.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use chrono::Utc;
use edupass_core::access::{grant_window, AccessStatus};
use edupass_core::error::CoreError;
use edupass_core::types::{DbId, Timestamp};
use edupass_core::verification::{generate_token, hash_token, short_link, validate_token_format};
use edupass_db::models::access::{AccessGrant, CreateAccessRequest};
use edupass_db::repositories::{AccessGrantRepo, AccessRequestRepo};
use serde::{Deserialize, Serialize};

use crate::auth::access_token;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::ws::WsFrame;

/// Header a client may use instead of the JSON body to present its token.
pub const ACCESS_TOKEN_HEADER: &str = "x-access-token";

const GRANT_FAILED: &str = "Failed to grant access. Please try again.";
const REQUEST_FAILED: &str = "Failed to create verification link. Please try again.";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Optional body for `POST /access/check`.
#[derive(Debug, Default, Deserialize)]
pub struct CheckAccessRequest {
    pub token: Option<String>,
}

/// Body for `POST /access/verify`.
#[derive(Debug, Deserialize)]
pub struct VerifyAccessRequest {
    pub token: String,
}

/// Returned whenever a grant is issued.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GrantResponse {
    pub granted_at: Timestamp,
    pub expires_at: Timestamp,
    pub remaining_hours: i64,
    /// Signed token the client may cache and present to `/access/check`.
    pub access_token: String,
}

/// Returned by `POST /access/request`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessLinkResponse {
    pub short_link: String,
    pub token: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/access/grant
///
/// Replace any existing grant for the caller with a fresh window.
pub async fn grant_access(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<GrantResponse>> {
    let response = issue_grant(&state, auth.user_id).await?;
    Ok(Json(response))
}

/// POST /api/v1/access/check
///
/// A valid cached access token answers without touching the database;
/// otherwise the stored grant decides.
pub async fn check_access(
    auth: AuthUser,
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> AppResult<Json<AccessStatus>> {
    let now = Utc::now();

    if let Some(token) = presented_token(&headers, &body)? {
        match access_token::verify(&token, auth.user_id, &state.config.access) {
            Ok(expires_at) => return Ok(Json(AccessStatus::from_token(expires_at, now))),
            Err(e) => {
                tracing::debug!(user_id = auth.user_id, error = %e, "Ignoring access token");
            }
        }
    }

    let status = match AccessGrantRepo::find_by_user(&state.pool, auth.user_id).await? {
        Some(grant) => AccessStatus::from_grant(grant.expires_at, now),
        None => AccessStatus::none(),
    };
    Ok(Json(status))
}

/// POST /api/v1/access/request
///
/// Mint a single-use verification link. Only the token digest is stored.
pub async fn request_access(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<AccessLinkResponse>> {
    let token = generate_token();
    let expires_at = Utc::now() + chrono::Duration::minutes(state.config.access.request_ttl_mins);

    let input = CreateAccessRequest {
        user_id: auth.user_id,
        token_hash: token.hash,
        expires_at,
    };
    AccessRequestRepo::create(&state.pool, &input)
        .await
        .map_err(|e| AppError::Unavailable {
            message: REQUEST_FAILED,
            cause: e.to_string(),
        })?;

    tracing::info!(user_id = auth.user_id, %expires_at, "Verification link issued");

    Ok(Json(AccessLinkResponse {
        short_link: short_link(&state.config.access.public_base_url, &token.plaintext),
        token: token.plaintext,
    }))
}

/// POST /api/v1/access/verify
///
/// Redeem a verification token and issue a grant. The caller's other open
/// tabs are told over WebSocket so they can refresh their status.
pub async fn verify_access(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<VerifyAccessRequest>,
) -> AppResult<Json<GrantResponse>> {
    validate_token_format(&input.token).map_err(|e| AppError::Core(CoreError::Validation(e)))?;

    let consumed =
        AccessRequestRepo::consume(&state.pool, &hash_token(&input.token), auth.user_id).await?;
    if consumed.is_none() {
        return Err(AppError::Core(CoreError::Validation(
            "Verification link is invalid, expired or already used".into(),
        )));
    }

    let response = issue_grant(&state, auth.user_id).await?;

    let status = AccessStatus::from_grant(response.expires_at, Utc::now());
    let frame = WsFrame::event(
        "access.granted",
        serde_json::to_value(&status).unwrap_or_default(),
    );
    let delivered = state
        .ws_manager
        .send_to_user(auth.user_id, frame.to_message())
        .await;
    tracing::debug!(user_id = auth.user_id, delivered, "Pushed access.granted");

    Ok(Json(response))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Upsert the caller's grant and sign a matching access token.
async fn issue_grant(state: &AppState, user_id: DbId) -> AppResult<GrantResponse> {
    let now = Utc::now();
    let (granted_at, expires_at) = grant_window(now, state.config.access.grant_hours);

    let grant: AccessGrant = AccessGrantRepo::upsert(&state.pool, user_id, granted_at, expires_at)
        .await
        .map_err(|e| AppError::Unavailable {
            message: GRANT_FAILED,
            cause: e.to_string(),
        })?;

    let access_token = access_token::issue(
        user_id,
        grant.granted_at,
        grant.expires_at,
        &state.config.access,
    )
    .map_err(|e| AppError::InternalError(format!("Access token signing error: {e}")))?;

    tracing::info!(user_id, expires_at = %grant.expires_at, "Access granted");

    let status = AccessStatus::from_grant(grant.expires_at, now);
    Ok(GrantResponse {
        granted_at: grant.granted_at,
        expires_at: grant.expires_at,
        remaining_hours: status.remaining_hours,
        access_token,
    })
}

/// The token from the JSON body, falling back to the header.
///
/// An empty body is allowed; a non-empty body must be valid JSON.
fn presented_token(headers: &HeaderMap, body: &Bytes) -> AppResult<Option<String>> {
    let from_body = if body.iter().all(u8::is_ascii_whitespace) {
        None
    } else {
        serde_json::from_slice::<CheckAccessRequest>(body)
            .map_err(|e| AppError::BadRequest(format!("Invalid JSON body: {e}")))?
            .token
    };

    let from_header = headers
        .get(ACCESS_TOKEN_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    Ok(from_body.or(from_header).filter(|t| !t.trim().is_empty()))
}
