//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// `?token=` query parameter carried by the WebSocket upgrade request.
#[derive(Debug, Deserialize)]
pub struct TokenParam {
    pub token: Option<String>,
}
