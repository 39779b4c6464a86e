//! EduPass change feed.
//!
//! - [`EventBus`]: in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`ChangeEvent`]: a row-level change to a table, carrying the row.
//! - [`FeedSubscription`]: a per-table subscription that is released when
//!   dropped.

pub mod bus;
pub mod feed;

pub use bus::{ChangeEvent, EventBus};
pub use feed::FeedSubscription;
