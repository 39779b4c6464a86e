//! Notification audience and unread-count rules.
//!
//! A notification row with no owner is a broadcast and is visible to every
//! user. The unread badge counts visible rows that are not yet read, and is
//! kept current from the realtime feed without refetching on every insert.

use serde::{Deserialize, Serialize};

use crate::change::ChangeKind;
use crate::types::DbId;

/// Who a notification is addressed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Audience {
    /// Every user.
    Broadcast,
    /// A single user.
    User(DbId),
}

impl Audience {
    /// Map the nullable `user_id` column to an audience.
    pub fn from_owner(user_id: Option<DbId>) -> Self {
        match user_id {
            Some(id) => Audience::User(id),
            None => Audience::Broadcast,
        }
    }

    /// Back to the nullable column representation.
    pub fn owner(self) -> Option<DbId> {
        match self {
            Audience::Broadcast => None,
            Audience::User(id) => Some(id),
        }
    }

    pub fn includes(self, viewer: DbId) -> bool {
        match self {
            Audience::Broadcast => true,
            Audience::User(id) => id == viewer,
        }
    }
}

/// What the cached counter did in response to a change event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterUpdate {
    /// The cached count was bumped by exactly one.
    Incremented,
    /// The change cannot be applied locally; the caller should refetch.
    Refetch,
    /// The change does not concern this viewer.
    Ignored,
}

/// Cached unread count for one viewer, fed by realtime change events.
#[derive(Debug, Clone)]
pub struct UnreadCounter {
    viewer: DbId,
    count: i64,
}

impl UnreadCounter {
    pub fn new(viewer: DbId, initial: i64) -> Self {
        Self {
            viewer,
            count: initial.max(0),
        }
    }

    pub fn count(&self) -> i64 {
        self.count
    }

    /// Replace the cached value with a freshly fetched count.
    pub fn reset(&mut self, count: i64) {
        self.count = count.max(0);
    }

    /// Apply a change to a notification row.
    ///
    /// Inserts of visible unread rows increment locally. Updates and
    /// deletes of visible rows may flip read state in either direction, so
    /// they ask for a refetch instead of guessing.
    pub fn apply(&mut self, kind: ChangeKind, owner: Option<DbId>, is_read: bool) -> CounterUpdate {
        if !Audience::from_owner(owner).includes(self.viewer) {
            return CounterUpdate::Ignored;
        }
        match kind {
            ChangeKind::Insert if !is_read => {
                self.count += 1;
                CounterUpdate::Incremented
            }
            ChangeKind::Insert => CounterUpdate::Ignored,
            ChangeKind::Update | ChangeKind::Delete => CounterUpdate::Refetch,
        }
    }
}

/// Browser notification permission as reported by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationPermission {
    Default,
    Granted,
    Denied,
}

/// A native OS notification is only raised for a backgrounded page that
/// has been granted permission.
pub fn should_show_native(permission: NotificationPermission, page_visible: bool) -> bool {
    permission == NotificationPermission::Granted && !page_visible
}
