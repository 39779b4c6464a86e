//! Per-table change subscriptions.
//!
//! A [`FeedSubscription`] owns its broadcast receiver. Dropping it on any
//! exit path (disconnect, error, shutdown) releases the receiver, so no
//! explicit unsubscribe call exists.

use tokio::sync::broadcast::{self, error::RecvError};

use crate::bus::ChangeEvent;

/// A live subscription to changes on one table.
pub struct FeedSubscription {
    table: &'static str,
    receiver: broadcast::Receiver<ChangeEvent>,
}

impl FeedSubscription {
    pub(crate) fn new(table: &'static str, receiver: broadcast::Receiver<ChangeEvent>) -> Self {
        tracing::debug!(table, "Feed subscription opened");
        Self { table, receiver }
    }

    /// Wait for the next change on this table.
    ///
    /// Events for other tables are skipped. If the subscriber fell behind,
    /// the missed events are logged and reception continues with the
    /// oldest retained one. Returns `None` once the bus is gone.
    pub async fn recv(&mut self) -> Option<ChangeEvent> {
        loop {
            match self.receiver.recv().await {
                Ok(event) if event.table == self.table => return Some(event),
                Ok(_) => continue,
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(table = self.table, skipped, "Feed subscriber lagged");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }
}

impl Drop for FeedSubscription {
    fn drop(&mut self) {
        tracing::debug!(table = self.table, "Feed subscription closed");
    }
}
