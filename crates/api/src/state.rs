use std::sync::Arc;

use edupass_events::EventBus;

use crate::config::ServerConfig;
use crate::relay::ChatProvider;
use crate::ws::WsManager;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: everything is behind `Arc` or is already `Clone`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: edupass_db::DbPool,
    pub config: Arc<ServerConfig>,
    /// WebSocket connection manager (browser clients).
    pub ws_manager: Arc<WsManager>,
    /// Change feed for realtime push.
    pub event_bus: Arc<EventBus>,
    /// Chat-completion backend used by the study assistant.
    pub chat: Arc<dyn ChatProvider>,
}
