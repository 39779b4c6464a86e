use axum::extract::ws::Message;
use chrono::{DateTime, Utc};
use edupass_events::ChangeEvent;
use serde::Serialize;

/// JSON frame pushed to browser clients.
///
/// ```json
/// { "type": "event", "event_type": "notification.insert", "payload": {...}, "timestamp": "..." }
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct WsFrame {
    #[serde(rename = "type")]
    pub frame_type: &'static str,
    pub event_type: String,
    pub payload: serde_json::Value,
    pub timestamp: DateTime<Utc>,
}

impl WsFrame {
    /// An application event frame.
    pub fn event(event_type: impl Into<String>, payload: serde_json::Value) -> Self {
        Self {
            frame_type: "event",
            event_type: event_type.into(),
            payload,
            timestamp: Utc::now(),
        }
    }

    /// Wrap a table change from the feed.
    pub fn from_change(event: &ChangeEvent) -> Self {
        Self {
            frame_type: "event",
            event_type: event.event_type(),
            payload: event.record.clone(),
            timestamp: event.timestamp,
        }
    }

    pub fn to_message(&self) -> Message {
        let text = serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string());
        Message::Text(text.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn change_frame_carries_row_and_event_type() {
        let change = ChangeEvent::insert("notifications", &json!({"id": 3, "user_id": 9}));
        let frame = WsFrame::from_change(&change);
        let value = serde_json::to_value(&frame).unwrap();
        assert_eq!(value["type"], "event");
        assert_eq!(value["event_type"], "notification.insert");
        assert_eq!(value["payload"]["id"], 3);
        assert!(value["timestamp"].is_string());
    }
}
