//! Handlers for the `/notifications` resource.
//!
//! Reads go straight to the repository; every mutation goes through
//! [`NotificationService`](crate::notifications::NotificationService) so
//! live feeds hear about it.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use rokto_core::error::CoreError;
use rokto_core::types::DbId;
use rokto_db::models::notification::Notification;
use rokto_db::repositories::NotificationRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for `GET /notifications`.
#[derive(Debug, Deserialize)]
pub struct NotificationListQuery {
    /// Only return unread notifications.
    #[serde(default)]
    pub unread_only: bool,
    /// Maximum number of results. Defaults to 50, capped at 100.
    pub limit: Option<i64>,
    /// Number of results to skip. Defaults to 0.
    pub offset: Option<i64>,
}

/// Maximum page size for notification listing.
const MAX_LIMIT: i64 = 100;

/// Default page size for notification listing.
const DEFAULT_LIMIT: i64 = 50;

/// GET /api/v1/notifications
///
/// List the caller's notifications, newest first.
pub async fn list_notifications(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<NotificationListQuery>,
) -> AppResult<Json<DataResponse<Vec<Notification>>>> {
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);
    let offset = params.offset.unwrap_or(0);

    let notifications = NotificationRepo::list_for_user(
        &state.pool,
        auth.user_id,
        params.unread_only,
        limit,
        offset,
    )
    .await?;
    Ok(Json(DataResponse {
        data: notifications,
    }))
}

/// GET /api/v1/notifications/unread-count
pub async fn unread_count(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<serde_json::Value>>> {
    let count = NotificationRepo::unread_count(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse {
        data: serde_json::json!({ "unread_count": count }),
    }))
}

/// POST /api/v1/notifications/{id}/read
///
/// Mark one notification as read. Idempotent: re-marking an already-read
/// notification succeeds without changing anything. 404 only when the
/// notification does not exist or belongs to someone else.
pub async fn mark_read(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<serde_json::Value>>> {
    let found = state.notifier.mark_read(auth.user_id, id).await?;
    if !found {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Notification",
            id,
        }));
    }
    Ok(Json(DataResponse {
        data: serde_json::json!({ "read": true }),
    }))
}

/// POST /api/v1/notifications/read-all
pub async fn mark_all_read(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<serde_json::Value>>> {
    let marked = state.notifier.mark_all_read(auth.user_id).await?;
    Ok(Json(DataResponse {
        data: serde_json::json!({ "marked_read": marked }),
    }))
}
