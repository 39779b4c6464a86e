//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`EventBus`] is shared via `Arc<EventBus>` across the application.
//! Handlers publish a [`ChangeEvent`] after every committed mutation to a
//! watched table; realtime subscribers filter the stream per table.

use chrono::{DateTime, Utc};
use edupass_core::change::ChangeKind;
use serde::Serialize;
use tokio::sync::broadcast;

use crate::feed::FeedSubscription;

// ---------------------------------------------------------------------------
// ChangeEvent
// ---------------------------------------------------------------------------

/// A row-level change to a table.
#[derive(Debug, Clone, Serialize)]
pub struct ChangeEvent {
    /// Table the row belongs to, e.g. `"notifications"`.
    pub table: &'static str,

    pub kind: ChangeKind,

    /// The row after the change (before it, for deletes).
    pub record: serde_json::Value,

    /// When the change was published (UTC).
    pub timestamp: DateTime<Utc>,
}

impl ChangeEvent {
    pub fn new(table: &'static str, kind: ChangeKind, record: serde_json::Value) -> Self {
        Self {
            table,
            kind,
            record,
            timestamp: Utc::now(),
        }
    }

    /// Serialize `row` into an INSERT event.
    ///
    /// A row that fails to serialize is carried as `null`.
    pub fn insert<T: Serialize>(table: &'static str, row: &T) -> Self {
        Self::new(table, ChangeKind::Insert, to_record(row))
    }

    pub fn update<T: Serialize>(table: &'static str, row: &T) -> Self {
        Self::new(table, ChangeKind::Update, to_record(row))
    }

    pub fn delete<T: Serialize>(table: &'static str, row: &T) -> Self {
        Self::new(table, ChangeKind::Delete, to_record(row))
    }

    /// Dot-separated name used on the wire, e.g. `"notification.insert"`.
    ///
    /// The table name is singularised by dropping a trailing `s`.
    pub fn event_type(&self) -> String {
        let entity = self.table.strip_suffix('s').unwrap_or(self.table);
        format!("{entity}.{}", self.kind.as_str())
    }
}

fn to_record<T: Serialize>(row: &T) -> serde_json::Value {
    serde_json::to_value(row).unwrap_or(serde_json::Value::Null)
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 1024;

/// In-process fan-out event bus.
///
/// # Usage
///
/// ```rust
/// use edupass_events::{ChangeEvent, EventBus};
///
/// let bus = EventBus::default();
/// let _feed = bus.subscribe_table("notifications");
///
/// bus.publish(ChangeEvent::insert("notifications", &serde_json::json!({"id": 1})));
/// ```
pub struct EventBus {
    sender: broadcast::Sender<ChangeEvent>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full, the oldest un-consumed messages are dropped
    /// and slow receivers will observe a `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    ///
    /// If there are no active subscribers the event is silently dropped.
    pub fn publish(&self, event: ChangeEvent) {
        // A SendError only means there are zero receivers.
        let _ = self.sender.send(event);
    }

    /// Subscribe to every event published on this bus.
    pub fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        self.sender.subscribe()
    }

    /// Subscribe to changes on a single table.
    pub fn subscribe_table(&self, table: &'static str) -> FeedSubscription {
        FeedSubscription::new(table, self.sender.subscribe())
    }

    /// Number of live receivers, including feed subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
