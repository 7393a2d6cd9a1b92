use std::sync::Arc;

use rokto_events::NotificationBus;

use crate::config::ServerConfig;
use crate::notifications::{DonorMatcher, NotificationService};
use crate::ws::WsManager;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
/// The pool and bus are constructed once at process start and injected here;
/// nothing reaches for ambient globals.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: rokto_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// WebSocket connection manager.
    pub ws_manager: Arc<WsManager>,
    /// Notification change bus feeding the live per-user subscriptions.
    pub bus: Arc<NotificationBus>,
    /// The single choke point through which notification records are minted.
    pub notifier: NotificationService,
    /// Donor/request matcher driving the request fan-out.
    pub matcher: DonorMatcher,
}
