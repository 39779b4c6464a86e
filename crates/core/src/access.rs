//! Time-boxed content access ("verification unlock") rules.
//!
//! A user holds at most one [grant](grant_window) at a time. Whether the
//! grant is still valid is a plain wall-clock comparison against the stored
//! expiry; every timestamp is UTC so no timezone normalization is needed.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::types::Timestamp;

/// Default lifetime of an access grant.
pub const DEFAULT_GRANT_HOURS: i64 = 24;

/// Seconds in one hour, used for the remaining-hours rounding.
const SECS_PER_HOUR: i64 = 3600;

/// The `(granted_at, expires_at)` pair for a grant issued at `now`.
pub fn grant_window(now: Timestamp, hours: i64) -> (Timestamp, Timestamp) {
    (now, now + Duration::hours(hours))
}

/// Where an access decision came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessSource {
    /// A signed access token presented by the client verified.
    Token,
    /// The stored grant row was consulted.
    Database,
    /// No token and no grant row exist for the user.
    None,
}

/// The answer to an entitlement check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessStatus {
    pub has_access: bool,
    pub expires_at: Option<Timestamp>,
    pub remaining_hours: i64,
    pub source: AccessSource,
}

impl AccessStatus {
    /// Status for a user without any grant.
    pub fn none() -> Self {
        Self {
            has_access: false,
            expires_at: None,
            remaining_hours: 0,
            source: AccessSource::None,
        }
    }

    /// Status derived from a stored grant expiry.
    pub fn from_grant(expires_at: Timestamp, now: Timestamp) -> Self {
        Self::evaluate(expires_at, now, AccessSource::Database)
    }

    /// Status derived from the `exp` claim of a verified access token.
    pub fn from_token(expires_at: Timestamp, now: Timestamp) -> Self {
        Self::evaluate(expires_at, now, AccessSource::Token)
    }

    fn evaluate(expires_at: Timestamp, now: Timestamp, source: AccessSource) -> Self {
        Self {
            has_access: is_active(expires_at, now),
            expires_at: Some(expires_at),
            remaining_hours: remaining_hours(expires_at, now),
            source,
        }
    }
}

/// A grant is active while its expiry lies strictly in the future.
pub fn is_active(expires_at: Timestamp, now: Timestamp) -> bool {
    expires_at > now
}

/// Whole hours left before `expires_at`, rounded up. Zero once expired.
pub fn remaining_hours(expires_at: Timestamp, now: Timestamp) -> i64 {
    let secs = (expires_at - now).num_seconds();
    if secs <= 0 {
        return 0;
    }
    (secs + SECS_PER_HOUR - 1) / SECS_PER_HOUR
}
