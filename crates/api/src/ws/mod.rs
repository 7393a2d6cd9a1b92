//! WebSocket infrastructure for real-time notification delivery.
//!
//! Provides connection management, heartbeat monitoring, and the HTTP
//! upgrade handler that bridges a connection to its owner's live
//! notification feed.

mod handler;
mod heartbeat;
pub mod manager;

pub use handler::ws_handler;
pub use heartbeat::start_heartbeat;
pub use manager::WsManager;
