//! Notification entity model and DTOs.

use edupass_core::notifications::Audience;
use edupass_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `notifications` table.
///
/// `user_id` is `None` for broadcast notifications.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Notification {
    pub id: DbId,
    pub user_id: Option<DbId>,
    pub title: String,
    pub message: String,
    pub is_read: bool,
    pub read_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Notification {
    pub fn audience(&self) -> Audience {
        Audience::from_owner(self.user_id)
    }
}

/// Result of marking a viewer's inbox read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadAll {
    pub marked: u64,
    /// Broadcast rows share one read flag, so flipping one changes every
    /// viewer's unread count.
    pub broadcast_touched: bool,
}

impl ReadAll {
    /// Who has to be told about the change.
    pub fn audience(&self, viewer: DbId) -> Audience {
        if self.broadcast_touched {
            Audience::Broadcast
        } else {
            Audience::User(viewer)
        }
    }
}

/// DTO for creating a notification. Omit `user_id` to broadcast.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateNotification {
    pub user_id: Option<DbId>,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1, max = 2000))]
    pub message: String,
}
