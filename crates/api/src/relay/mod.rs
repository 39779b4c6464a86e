//! Study assistant relay.
//!
//! Forwards a conversation to an OpenAI-compatible `chat/completions`
//! endpoint and returns the assistant reply. The provider sits behind the
//! [`ChatProvider`] trait so handlers never touch the HTTP client directly.

mod openai;

use async_trait::async_trait;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use edupass_core::chat::{ChatRequest, ModelSelection};
use serde_json::json;

use crate::config::{env_or, env_parse};

pub use openai::OpenAiRelay;

/// Default upstream endpoint.
const DEFAULT_API_URL: &str = "https://api.openai.com/v1/chat/completions";
const DEFAULT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_VISION_MODEL: &str = "gpt-4o";
const DEFAULT_TIMEOUT_SECS: u64 = 60;
const DEFAULT_SYSTEM_PROMPT: &str = "You are a friendly study assistant for students preparing \
    for competitive exams. Explain concepts step by step and keep answers concise.";

/// Relay configuration.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Upstream API key. Without one the relay refuses every request.
    pub api_key: Option<String>,
    pub api_url: String,
    pub models: ModelSelection,
    pub system_prompt: String,
    pub timeout_secs: u64,
}

impl RelayConfig {
    /// Load relay configuration from environment variables.
    ///
    /// | Env Var            | Default                                      |
    /// |--------------------|----------------------------------------------|
    /// | `AI_API_KEY`       | unset (relay disabled)                       |
    /// | `AI_API_URL`       | `https://api.openai.com/v1/chat/completions` |
    /// | `AI_DEFAULT_MODEL` | `gpt-4o-mini`                                |
    /// | `AI_VISION_MODEL`  | `gpt-4o`                                     |
    /// | `AI_SYSTEM_PROMPT` | built-in study assistant prompt              |
    /// | `AI_TIMEOUT_SECS`  | `60`                                         |
    pub fn from_env() -> Self {
        let api_key = std::env::var("AI_API_KEY").ok().filter(|k| !k.is_empty());
        let api_url = env_or("AI_API_URL", DEFAULT_API_URL);
        let default_model = env_or("AI_DEFAULT_MODEL", DEFAULT_MODEL);
        let vision_model = env_or("AI_VISION_MODEL", DEFAULT_VISION_MODEL);
        let system_prompt = env_or("AI_SYSTEM_PROMPT", DEFAULT_SYSTEM_PROMPT);
        let timeout_secs = env_parse("AI_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS);

        Self {
            api_key,
            api_url,
            models: ModelSelection {
                default_model,
                vision_model,
            },
            system_prompt,
            timeout_secs,
        }
    }
}

/// Relay failures. Every variant answers with `{ "error": ... }`.
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("AI service is not configured")]
    NotConfigured,

    #[error("{0}")]
    InvalidRequest(String),

    #[error("AI request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("AI service returned HTTP {0}")]
    Upstream(u16),
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            RelayError::NotConfigured => {
                tracing::error!("Chat relay called without AI_API_KEY");
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
            RelayError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            RelayError::Request(e) => {
                tracing::error!(error = %e, "Chat relay request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to reach AI service".to_string(),
                )
            }
            RelayError::Upstream(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "AI service returned an error".to_string(),
            ),
        };
        (status, axum::Json(json!({ "error": message }))).into_response()
    }
}

/// A chat-completion backend.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Produce the assistant reply for an already validated request.
    async fn complete(&self, request: &ChatRequest) -> Result<String, RelayError>;
}
