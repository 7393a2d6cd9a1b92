use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use serde::Deserialize;
use serde_json::json;

use rokto_core::types::DbId;
use rokto_db::repositories::NotificationRepo;
use rokto_events::{NotificationBus, NotificationFeed};

use crate::auth::jwt::validate_token;
use crate::state::AppState;
use crate::ws::manager::{WsManager, WsSender};

/// Snapshot size sent when a feed opens.
const SNAPSHOT_LIMIT: i64 = 50;

/// Query parameters for the WebSocket upgrade.
///
/// Browsers cannot set headers on a WebSocket handshake, so the access
/// token rides a query parameter instead of `Authorization`.
#[derive(Debug, Deserialize)]
pub struct WsParams {
    pub token: Option<String>,
}

/// HTTP handler that upgrades the connection to WebSocket.
///
/// A valid token binds the connection to its user and attaches a live
/// notification feed; without one the socket stays connected but only
/// receives heartbeat pings.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    Query(params): Query<WsParams>,
    State(state): State<AppState>,
) -> impl IntoResponse {
    let user_id = params
        .token
        .as_deref()
        .and_then(|t| validate_token(t, &state.config.jwt).ok())
        .map(|claims| claims.sub);

    ws.on_upgrade(move |socket| handle_socket(socket, state, user_id))
}

/// Manage a single WebSocket connection after upgrade.
///
/// Splits the socket into a sink (outbound) and stream (inbound), then:
///   1. Registers the connection with `WsManager`.
///   2. Spawns a sender task that forwards channel messages to the sink.
///   3. For authenticated connections, spawns the feed bridge.
///   4. Processes inbound messages on the current task.
///   5. Cleans up on disconnect.
async fn handle_socket(socket: WebSocket, state: AppState, user_id: Option<DbId>) {
    let conn_id = uuid::Uuid::new_v4().to_string();
    tracing::info!(conn_id = %conn_id, user_id, "WebSocket connected");

    let ws_manager: Arc<WsManager> = Arc::clone(&state.ws_manager);
    let (tx, mut rx) = ws_manager.register(conn_id.clone(), user_id).await;

    let (mut sink, mut stream) = socket.split();

    // Sender task: forward channel messages to the WebSocket sink.
    let sender_conn_id = conn_id.clone();
    let send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sink.send(msg).await.is_err() {
                tracing::debug!(conn_id = %sender_conn_id, "WebSocket sink closed");
                break;
            }
        }
    });

    // Feed bridge: authenticated connections observe their live feed.
    let feed_task = user_id.map(|uid| {
        let pool = state.pool.clone();
        let bus = Arc::clone(&state.bus);
        let tx = tx.clone();
        tokio::spawn(async move {
            run_feed_bridge(pool, bus, uid, tx).await;
        })
    });

    // Receiver loop: process inbound messages.
    while let Some(result) = stream.next().await {
        match result {
            Ok(Message::Close(_)) => break,
            Ok(Message::Pong(_)) => {
                tracing::trace!(conn_id = %conn_id, "Pong received");
            }
            Ok(_msg) => {
                // Clients only listen on this channel.
            }
            Err(e) => {
                tracing::debug!(conn_id = %conn_id, error = %e, "WebSocket receive error");
                break;
            }
        }
    }

    // Clean up: remove connection and stop both tasks.
    ws_manager.remove(&conn_id).await;
    if let Some(task) = feed_task {
        task.abort();
    }
    send_task.abort();
    tracing::info!(conn_id = %conn_id, "WebSocket disconnected");
}

/// Bridge a user's live notification feed onto a connection channel.
///
/// Opens the feed with a snapshot of the user's current notifications,
/// pushes the initial badge state, then forwards every applied change
/// together with the recomputed unread count. The subscription is released
/// when the connection channel closes.
async fn run_feed_bridge(
    pool: rokto_db::DbPool,
    bus: Arc<NotificationBus>,
    user_id: DbId,
    tx: WsSender,
) {
    let snapshot =
        match NotificationRepo::list_for_user(&pool, user_id, false, SNAPSHOT_LIMIT, 0).await {
            Ok(rows) => rows,
            Err(e) => {
                tracing::error!(error = %e, user_id, "Failed to load feed snapshot");
                Vec::new()
            }
        };

    let mut feed = NotificationFeed::subscribe(&bus, user_id, snapshot);

    let hello = json!({
        "type": "feed_snapshot",
        "unread_count": feed.unread_count(),
        "notifications": feed.notifications(),
    });
    if tx.send(Message::Text(hello.to_string().into())).is_err() {
        feed.unsubscribe();
        return;
    }

    while let Some(update) = feed.next_change().await {
        let msg = json!({
            "type": "feed_update",
            "update": update,
            "unread_count": feed.unread_count(),
        });
        if tx.send(Message::Text(msg.to_string().into())).is_err() {
            // Connection gone; release the subscription and stop.
            break;
        }
    }

    feed.unsubscribe();
    tracing::debug!(user_id, "Feed bridge stopped");
}
