pub mod admin;
pub mod donors;
pub mod health;
pub mod notification;
pub mod posts;
pub mod profile;
pub mod requests;

use axum::routing::get;
use axum::Router;

use crate::state::AppState;
use crate::ws;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /ws                                   notification feed WebSocket
///
/// /profiles                             create (POST)
/// /profiles/me                          caller's own profile (GET)
/// /profiles/{id}                        get, update (GET, PUT)
/// /profiles/{id}/availability           flip availability switch (PUT)
///
/// /donors                               donor search (?blood_group, district, division)
///
/// /requests                             list, create (GET, POST; create triggers fan-out)
/// /requests/{id}                        get, delete (GET, DELETE)
/// /requests/{id}/fulfill                mark fulfilled (POST)
///
/// /notifications                        list (?unread_only, limit, offset)
/// /notifications/read-all               mark all read (POST)
/// /notifications/unread-count           unread count (GET)
/// /notifications/{id}/read              mark read (POST)
///
/// /posts                                list, create (GET, POST)
/// /posts/{id}/like                      like once (POST, notifies author)
/// /posts/{id}/comments                  list, add (GET, POST; add notifies author)
///
/// /admin/users                          list all profiles (admin only)
/// /admin/users/{id}/verify              set verification flag (PUT)
/// /admin/users/{id}/notify              mint announcement notification (POST)
/// /admin/requests/{id}                  remove any request (DELETE)
/// /admin/stats                          platform counters (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Live notification feed.
        .route("/ws", get(ws::ws_handler))
        // Profile management and availability.
        .nest("/profiles", profile::router())
        // Donor discovery.
        .nest("/donors", donors::router())
        // Blood requests and the matcher fan-out.
        .nest("/requests", requests::router())
        // Notification inbox.
        .nest("/notifications", notification::router())
        // Community feed.
        .nest("/posts", posts::router())
        // Admin console.
        .nest("/admin", admin::router())
}
