//! Route definitions for the `/requests` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::requests;
use crate::state::AppState;

/// Routes mounted at `/requests`.
///
/// ```text
/// GET    /               -> list_requests (?status, limit, offset)
/// POST   /               -> create_request (triggers donor fan-out)
/// GET    /{id}           -> get_request
/// DELETE /{id}           -> delete_request
/// POST   /{id}/fulfill   -> fulfill_request
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(requests::list_requests).post(requests::create_request),
        )
        .route(
            "/{id}",
            get(requests::get_request).delete(requests::delete_request),
        )
        .route("/{id}/fulfill", post(requests::fulfill_request))
}
