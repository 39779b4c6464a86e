//! Lookups against the seeded `roles` table.
//!
//! Roles are reference data written by the first migration, so only ids
//! and names are ever read back.

use edupass_core::types::DbId;
use sqlx::PgPool;

pub struct RoleRepo;

impl RoleRepo {
    pub async fn id_by_name(pool: &PgPool, name: &str) -> Result<Option<DbId>, sqlx::Error> {
        sqlx::query_scalar("SELECT id FROM roles WHERE name = $1")
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// Name for a role id, `"unknown"` if the id is missing.
    pub async fn resolve_name(pool: &PgPool, role_id: DbId) -> Result<String, sqlx::Error> {
        let name: Option<String> = sqlx::query_scalar("SELECT name FROM roles WHERE id = $1")
            .bind(role_id)
            .fetch_optional(pool)
            .await?;
        Ok(name.unwrap_or_else(|| "unknown".to_string()))
    }

    /// Current role name of an active user, or `None` if the user is gone
    /// or deactivated.
    pub async fn role_name_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<String>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT r.name FROM users u \
             JOIN roles r ON u.role_id = r.id \
             WHERE u.id = $1 AND u.is_active = true",
        )
        .bind(user_id)
        .fetch_optional(pool)
        .await
    }
}
