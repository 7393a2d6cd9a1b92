//! Route definitions for the `/profiles` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::profile;
use crate::state::AppState;

/// Routes mounted at `/profiles`.
///
/// ```text
/// POST   /                    -> create_profile
/// GET    /me                  -> get_me
/// GET    /{id}                -> get_profile
/// PUT    /{id}                -> update_profile
/// PUT    /{id}/availability   -> set_availability
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(profile::create_profile))
        .route("/me", get(profile::get_me))
        .route(
            "/{id}",
            get(profile::get_profile).put(profile::update_profile),
        )
        .route("/{id}/availability", put(profile::set_availability))
}
