//! OpenAI-compatible `chat/completions` client.

use std::time::Duration;

use async_trait::async_trait;
use edupass_core::chat::{build_upstream_messages, extract_reply, ChatRequest};
use serde_json::json;

use super::{ChatProvider, RelayConfig, RelayError};

/// Relay that forwards to the configured upstream endpoint.
pub struct OpenAiRelay {
    client: reqwest::Client,
    config: RelayConfig,
}

impl OpenAiRelay {
    pub fn new(config: RelayConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client, config })
    }

    /// Build the JSON body sent upstream.
    fn payload(&self, request: &ChatRequest) -> serde_json::Value {
        let image = request.image();
        json!({
            "model": self.config.models.select(image.is_some()),
            "messages": build_upstream_messages(&self.config.system_prompt, &request.messages, image),
        })
    }
}

#[async_trait]
impl ChatProvider for OpenAiRelay {
    async fn complete(&self, request: &ChatRequest) -> Result<String, RelayError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(RelayError::NotConfigured)?;

        let payload = self.payload(request);
        tracing::debug!(
            model = %payload["model"],
            turns = request.messages.len(),
            has_image = request.image().is_some(),
            "Forwarding chat request"
        );

        let response = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(api_key)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = status.as_u16(), body = %body, "AI service returned an error");
            return Err(RelayError::Upstream(status.as_u16()));
        }

        let body: serde_json::Value = response.json().await?;
        Ok(extract_reply(&body))
    }
}

#[cfg(test)]
mod tests {
    use edupass_core::chat::{ChatMessage, ModelSelection};

    use super::*;

    fn config(api_key: Option<&str>) -> RelayConfig {
        RelayConfig {
            api_key: api_key.map(str::to_string),
            api_url: "http://127.0.0.1:1/v1/chat/completions".to_string(),
            models: ModelSelection {
                default_model: "text-model".to_string(),
                vision_model: "vision-model".to_string(),
            },
            system_prompt: "Be brief".to_string(),
            timeout_secs: 5,
        }
    }

    fn request(image_url: Option<&str>) -> ChatRequest {
        ChatRequest {
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: "Explain inertia".to_string(),
            }],
            image_url: image_url.map(str::to_string),
        }
    }

    #[test]
    fn payload_uses_default_model_without_image() {
        let relay = OpenAiRelay::new(config(Some("k"))).unwrap();
        let body = relay.payload(&request(None));
        assert_eq!(body["model"], "text-model");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][0]["content"], "Be brief");
    }

    #[test]
    fn payload_uses_vision_model_with_image() {
        let relay = OpenAiRelay::new(config(Some("k"))).unwrap();
        let body = relay.payload(&request(Some("https://img.example.com/q.png")));
        assert_eq!(body["model"], "vision-model");
        assert_eq!(
            body["messages"][1]["content"][1]["image_url"]["url"],
            "https://img.example.com/q.png"
        );
    }

    #[tokio::test]
    async fn missing_api_key_is_not_configured() {
        let relay = OpenAiRelay::new(config(None)).unwrap();
        let err = relay.complete(&request(None)).await.unwrap_err();
        assert!(matches!(err, RelayError::NotConfigured));
        assert_eq!(err.to_string(), "AI service is not configured");
    }
}
