//! Route definitions for the admin console. Authorization is enforced
//! per handler via the `RequireAdmin` extractor.

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// ```text
/// GET    /users                -> list_users
/// PUT    /users/{id}/verify    -> verify_user
/// POST   /users/{id}/notify    -> notify_user
/// DELETE /requests/{id}        -> delete_request
/// GET    /stats                -> get_stats
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(admin::list_users))
        .route("/users/{id}/verify", put(admin::verify_user))
        .route("/users/{id}/notify", post(admin::notify_user))
        .route("/requests/{id}", delete(admin::delete_request))
        .route("/stats", get(admin::get_stats))
}
