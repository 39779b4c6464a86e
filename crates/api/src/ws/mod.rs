//! WebSocket infrastructure for realtime push.
//!
//! Provides connection management, the JSON frame format, heartbeat
//! pings, and the HTTP upgrade handler used by Axum routes.

mod frame;
mod handler;
mod heartbeat;
pub mod manager;

pub use frame::WsFrame;
pub use handler::ws_handler;
pub use heartbeat::start_heartbeat;
pub use manager::WsManager;
