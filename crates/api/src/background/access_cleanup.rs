//! Periodic purge of spent access state.
//!
//! Deletes consumed or expired verification requests, grants that expired
//! more than a week ago, and expired or revoked sessions.

use std::time::Duration;

use chrono::Utc;
use edupass_db::repositories::{AccessGrantRepo, AccessRequestRepo, SessionRepo};
use sqlx::PgPool;
use tokio_util::sync::CancellationToken;

/// Expired grants are kept this long so `check` can still report them.
const GRANT_RETENTION_DAYS: i64 = 7;

/// How often the cleanup job runs.
const CLEANUP_INTERVAL: Duration = Duration::from_secs(3600);

/// Run the cleanup loop until `cancel` is triggered.
pub async fn run(pool: PgPool, cancel: CancellationToken) {
    tracing::info!(
        interval_secs = CLEANUP_INTERVAL.as_secs(),
        grant_retention_days = GRANT_RETENTION_DAYS,
        "Access cleanup job started"
    );

    let mut interval = tokio::time::interval(CLEANUP_INTERVAL);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Access cleanup job stopping");
                break;
            }
            _ = interval.tick() => sweep(&pool).await,
        }
    }
}

async fn sweep(pool: &PgPool) {
    match AccessRequestRepo::delete_stale(pool).await {
        Ok(0) => tracing::debug!("Access cleanup: no stale requests"),
        Ok(deleted) => tracing::info!(deleted, "Access cleanup: purged stale requests"),
        Err(e) => tracing::error!(error = %e, "Access cleanup: request purge failed"),
    }

    let cutoff = Utc::now() - chrono::Duration::days(GRANT_RETENTION_DAYS);
    match AccessGrantRepo::delete_expired_before(pool, cutoff).await {
        Ok(0) => {}
        Ok(deleted) => tracing::info!(deleted, "Access cleanup: purged expired grants"),
        Err(e) => tracing::error!(error = %e, "Access cleanup: grant purge failed"),
    }

    match SessionRepo::purge_dead(pool).await {
        Ok(0) => {}
        Ok(deleted) => tracing::info!(deleted, "Access cleanup: purged dead sessions"),
        Err(e) => tracing::error!(error = %e, "Access cleanup: session purge failed"),
    }
}
