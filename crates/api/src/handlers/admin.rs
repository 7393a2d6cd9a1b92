//! Admin console handlers. Every route here requires the `admin` role via
//! the [`RequireAdmin`] extractor.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use validator::Validate;

use rokto_core::error::CoreError;
use rokto_core::kinds::KIND_ADMIN;
use rokto_core::types::DbId;
use rokto_db::models::profile::Profile;
use rokto_db::repositories::{BloodRequestRepo, ProfileRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Query parameters for `GET /admin/users`.
#[derive(Debug, Deserialize)]
pub struct UserListQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Request body for `PUT /admin/users/{id}/verify`.
#[derive(Debug, Deserialize)]
pub struct VerifyRequest {
    pub is_verified: bool,
}

/// Request body for `POST /admin/users/{id}/notify`.
#[derive(Debug, Deserialize, Validate)]
pub struct AdminNotifyRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1, max = 2000))]
    pub body: String,
    pub link: Option<String>,
}

/// Platform counters for the admin dashboard.
#[derive(Debug, Serialize)]
pub struct PlatformStats {
    pub total_profiles: i64,
    pub available_donors: i64,
    pub open_requests: i64,
}

const MAX_LIMIT: i64 = 100;
const DEFAULT_LIMIT: i64 = 50;

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/users
pub async fn list_users(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<UserListQuery>,
) -> AppResult<Json<DataResponse<Vec<Profile>>>> {
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);
    let offset = params.offset.unwrap_or(0);

    let users = ProfileRepo::list(&state.pool, limit, offset).await?;
    Ok(Json(DataResponse { data: users }))
}

/// PUT /api/v1/admin/users/{id}/verify
pub async fn verify_user(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<VerifyRequest>,
) -> AppResult<impl IntoResponse> {
    let found = ProfileRepo::set_verified(&state.pool, id, input.is_verified).await?;
    if !found {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Profile",
            id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/admin/users/{id}/notify
///
/// Mint an announcement notification for one user. Goes through the same
/// service as every other notification, so the target's live feed sees it.
pub async fn notify_user(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<AdminNotifyRequest>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    if ProfileRepo::find_by_id(&state.pool, id).await?.is_none() {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Profile",
            id,
        }));
    }

    let notification = state
        .notifier
        .create(
            id,
            &input.title,
            &input.body,
            KIND_ADMIN,
            input.link.as_deref(),
        )
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(DataResponse { data: notification }),
    ))
}

/// DELETE /api/v1/admin/requests/{id}
pub async fn delete_request(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let found = BloodRequestRepo::delete(&state.pool, id).await?;
    if !found {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "BloodRequest",
            id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/admin/stats
pub async fn get_stats(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<PlatformStats>>> {
    let stats = PlatformStats {
        total_profiles: ProfileRepo::count(&state.pool).await?,
        available_donors: ProfileRepo::count_available_donors(&state.pool).await?,
        open_requests: BloodRequestRepo::count_open(&state.pool).await?,
    };
    Ok(Json(DataResponse { data: stats }))
}
