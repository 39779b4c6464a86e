//! Role-based access control (RBAC) extractors.
//!
//! The role claim is only a hint. An `admin` claim is confirmed against
//! the stored role on every request, so a demotion takes effect before
//! the session token expires.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use edupass_core::error::CoreError;
use edupass_core::roles::ROLE_ADMIN;
use edupass_db::repositories::RoleRepo;

use super::auth::AuthUser;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Requires the `admin` role. Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn admin_only(RequireAdmin(user): RequireAdmin) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !is_admin(state, &user).await? {
            return Err(AppError::Core(CoreError::Forbidden(
                "Admin role required".into(),
            )));
        }
        Ok(RequireAdmin(user))
    }
}

/// Whether `user` is an admin right now.
///
/// Non-admin claims are refused without a query. An admin claim must still
/// match the stored role of an active account.
pub async fn is_admin(state: &AppState, user: &AuthUser) -> AppResult<bool> {
    if user.role != ROLE_ADMIN {
        return Ok(false);
    }
    let stored = RoleRepo::role_name_for_user(&state.pool, user.user_id).await?;
    if stored.as_deref() != Some(ROLE_ADMIN) {
        tracing::warn!(
            user_id = user.user_id,
            stored_role = stored.as_deref().unwrap_or("none"),
            "Admin claim no longer matches stored role"
        );
        return Ok(false);
    }
    Ok(true)
}
