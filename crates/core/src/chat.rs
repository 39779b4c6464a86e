//! Study assistant chat: request validation, model selection and reply
//! extraction for the chat-completion relay.
//!
//! The relay speaks the OpenAI-compatible `chat/completions` wire format.
//! Everything here is pure so the HTTP client stays a thin shell.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Reply used when the upstream response carries no message text.
pub const FALLBACK_REPLY: &str = "Sorry, I could not generate a response.";

/// Upper bound on conversation length forwarded upstream.
pub const MAX_MESSAGES: usize = 50;

/// A single turn of the conversation as sent by the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

/// Client request body for the relay.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl ChatRequest {
    /// The attached image, ignoring blank values.
    pub fn image(&self) -> Option<&str> {
        self.image_url.as_deref().map(str::trim).filter(|u| !u.is_empty())
    }
}

/// Roles a client may send. `system` is reserved for the server prompt.
const CLIENT_ROLES: [&str; 2] = ["user", "assistant"];

/// Check the conversation before it is forwarded.
pub fn validate_request(request: &ChatRequest) -> Result<(), String> {
    if request.messages.is_empty() {
        return Err("messages must not be empty".to_string());
    }
    if request.messages.len() > MAX_MESSAGES {
        return Err(format!("at most {MAX_MESSAGES} messages may be sent"));
    }
    if let Some(bad) = request
        .messages
        .iter()
        .find(|m| !CLIENT_ROLES.contains(&m.role.as_str()))
    {
        return Err(format!("unsupported message role '{}'", bad.role));
    }
    if let Some(url) = request.image() {
        let allowed = url.starts_with("https://")
            || url.starts_with("http://")
            || url.starts_with("data:image/");
        if !allowed {
            return Err("imageUrl must be an http(s) or data:image URL".to_string());
        }
    }
    Ok(())
}

/// Model names the relay chooses between.
#[derive(Debug, Clone)]
pub struct ModelSelection {
    pub default_model: String,
    pub vision_model: String,
}

impl ModelSelection {
    /// The vision-capable model is used only when an image is attached.
    pub fn select(&self, has_image: bool) -> &str {
        if has_image {
            &self.vision_model
        } else {
            &self.default_model
        }
    }
}

/// Build the upstream `messages` array.
///
/// The system prompt goes first. When an image is attached, the last user
/// turn is rewritten into multi-part content carrying the text and the
/// image reference.
pub fn build_upstream_messages(
    system_prompt: &str,
    messages: &[ChatMessage],
    image_url: Option<&str>,
) -> Vec<Value> {
    let last_user = messages.iter().rposition(|m| m.role == "user");

    let mut out = Vec::with_capacity(messages.len() + 1);
    out.push(json!({ "role": "system", "content": system_prompt }));

    for (idx, msg) in messages.iter().enumerate() {
        match image_url {
            Some(url) if Some(idx) == last_user => out.push(json!({
                "role": msg.role,
                "content": [
                    { "type": "text", "text": msg.content },
                    { "type": "image_url", "image_url": { "url": url } },
                ],
            })),
            _ => out.push(json!({ "role": msg.role, "content": msg.content })),
        }
    }
    out
}

/// Pull the assistant text out of a `chat/completions` response body.
pub fn extract_reply(body: &Value) -> String {
    body.pointer("/choices/0/message/content")
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| FALLBACK_REPLY.to_string())
}
