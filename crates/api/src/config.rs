use std::fmt::Display;
use std::str::FromStr;

use crate::auth::access_token::AccessConfig;
use crate::auth::jwt::JwtConfig;
use crate::relay::RelayConfig;

/// Server configuration loaded from environment variables.
///
/// Everything except `JWT_SECRET` has a local-development default.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Parsed from the comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    pub request_timeout_secs: u64,
    /// Upper bound on post-shutdown cleanup.
    pub shutdown_timeout_secs: u64,
    pub jwt: JwtConfig,
    pub access: AccessConfig,
    pub relay: RelayConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                 |
    /// |-------------------------|-------------------------|
    /// | `HOST`                  | `0.0.0.0`               |
    /// | `PORT`                  | `3000`                  |
    /// | `CORS_ORIGINS`          | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`  | `30`                    |
    /// | `SHUTDOWN_TIMEOUT_SECS` | `30`                    |
    ///
    /// Nested sections read their own variables; see [`JwtConfig::from_env`],
    /// [`AccessConfig::from_env`] and [`RelayConfig::from_env`].
    ///
    /// # Panics
    ///
    /// Panics on a missing `JWT_SECRET` or an unparseable numeric value.
    pub fn from_env() -> Self {
        let cors_origins = env_or("CORS_ORIGINS", "http://localhost:5173")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let jwt = JwtConfig::from_env();
        let access = AccessConfig::from_env(&jwt.secret);

        Self {
            host: env_or("HOST", "0.0.0.0"),
            port: env_parse("PORT", 3000),
            cors_origins,
            request_timeout_secs: env_parse("REQUEST_TIMEOUT_SECS", 30),
            shutdown_timeout_secs: env_parse("SHUTDOWN_TIMEOUT_SECS", 30),
            jwt,
            access,
            relay: RelayConfig::from_env(),
        }
    }
}

/// A string variable, or `default` when unset.
pub(crate) fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// A variable parsed as `T`, or `default` when unset.
///
/// # Panics
///
/// Panics when the variable is set but does not parse.
pub(crate) fn env_parse<T>(key: &str, default: T) -> T
where
    T: FromStr,
    T::Err: Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .unwrap_or_else(|e| panic!("{key} has an invalid value '{raw}': {e}")),
        Err(_) => default,
    }
}
