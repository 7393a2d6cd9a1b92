//! Route definitions for the `/posts` social feed.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::posts;
use crate::state::AppState;

/// Routes mounted at `/posts`.
///
/// ```text
/// GET    /                 -> list_posts (?limit, offset)
/// POST   /                 -> create_post
/// POST   /{id}/like        -> like_post
/// GET    /{id}/comments    -> list_comments
/// POST   /{id}/comments    -> add_comment
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(posts::list_posts).post(posts::create_post))
        .route("/{id}/like", post(posts::like_post))
        .route(
            "/{id}/comments",
            get(posts::list_comments).post(posts::add_comment),
        )
}
