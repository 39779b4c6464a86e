//! Signed content-access tokens.
//!
//! When a grant is issued the client receives an HS256 token whose `exp`
//! equals the grant's expiry. On a later status check the server trusts a
//! token only if the signature, the subject and the expiry all verify;
//! anything else falls through to the stored grant row.
//!
//! Access tokens are signed with their own secret so a leaked session key
//! cannot mint unlocks.

use chrono::DateTime;
use edupass_core::access::DEFAULT_GRANT_HOURS;
use edupass_core::types::{DbId, Timestamp};
use edupass_core::verification::DEFAULT_REQUEST_TTL_MINS;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::{env_or, env_parse};

/// Scope claim carried by every access token.
const ACCESS_SCOPE: &str = "content_access";

/// Claims embedded in an access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessClaims {
    pub sub: DbId,
    pub scope: String,
    pub iat: i64,
    pub exp: i64,
}

/// Configuration for the access-grant flow.
#[derive(Debug, Clone)]
pub struct AccessConfig {
    /// HMAC secret for access tokens.
    pub token_secret: String,
    /// Lifetime of an issued grant in hours (default: 24).
    pub grant_hours: i64,
    /// Lifetime of a verification link in minutes (default: 30).
    pub request_ttl_mins: i64,
    /// Base URL short links are built on.
    pub public_base_url: String,
}

impl AccessConfig {
    /// Load access configuration from environment variables.
    ///
    /// | Env Var                   | Default                  |
    /// |---------------------------|--------------------------|
    /// | `ACCESS_TOKEN_SECRET`     | the session JWT secret   |
    /// | `ACCESS_GRANT_HOURS`      | `24`                     |
    /// | `ACCESS_REQUEST_TTL_MINS` | `30`                     |
    /// | `PUBLIC_BASE_URL`         | `http://localhost:5173`  |
    pub fn from_env(fallback_secret: &str) -> Self {
        let token_secret = std::env::var("ACCESS_TOKEN_SECRET")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| fallback_secret.to_string());

        let grant_hours = env_parse("ACCESS_GRANT_HOURS", DEFAULT_GRANT_HOURS);
        assert!(grant_hours > 0, "ACCESS_GRANT_HOURS must be positive");

        let request_ttl_mins = env_parse("ACCESS_REQUEST_TTL_MINS", DEFAULT_REQUEST_TTL_MINS);
        let public_base_url = env_or("PUBLIC_BASE_URL", "http://localhost:5173");

        Self {
            token_secret,
            grant_hours,
            request_ttl_mins,
            public_base_url,
        }
    }
}

/// Why a presented access token was not trusted.
#[derive(Debug, thiserror::Error)]
pub enum AccessTokenError {
    #[error("Access token rejected: {0}")]
    Invalid(#[from] jsonwebtoken::errors::Error),

    #[error("Access token was issued to another user")]
    WrongSubject,

    #[error("Token is not an access token")]
    WrongScope,

    #[error("Access token expiry is out of range")]
    BadExpiry,
}

/// Sign an access token for `user_id` that expires with the grant.
pub fn issue(
    user_id: DbId,
    granted_at: Timestamp,
    expires_at: Timestamp,
    config: &AccessConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let claims = AccessClaims {
        sub: user_id,
        scope: ACCESS_SCOPE.to_string(),
        iat: granted_at.timestamp(),
        exp: expires_at.timestamp(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.token_secret.as_bytes()),
    )
}

/// Verify a token for `expected_user`, returning its expiry.
pub fn verify(
    token: &str,
    expected_user: DbId,
    config: &AccessConfig,
) -> Result<Timestamp, AccessTokenError> {
    let mut validation = Validation::default();
    validation.leeway = 0;

    let claims = decode::<AccessClaims>(
        token,
        &DecodingKey::from_secret(config.token_secret.as_bytes()),
        &validation,
    )?
    .claims;

    if claims.scope != ACCESS_SCOPE {
        return Err(AccessTokenError::WrongScope);
    }
    if claims.sub != expected_user {
        return Err(AccessTokenError::WrongSubject);
    }
    DateTime::from_timestamp(claims.exp, 0).ok_or(AccessTokenError::BadExpiry)
}
