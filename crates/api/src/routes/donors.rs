//! Route definitions for the `/donors` discovery resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::donors;
use crate::state::AppState;

/// Routes mounted at `/donors`.
///
/// ```text
/// GET    /    -> search_donors (?blood_group, district, division)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(donors::search_donors))
}
