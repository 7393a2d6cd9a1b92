//! Handlers for the `/requests` resource.
//!
//! Creating a request triggers the donor matcher fan-out. The fan-out
//! never fails the request-creation path: the requester sees their
//! request posted even if zero notifications could be delivered.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use rokto_core::blood::BloodGroup;
use rokto_core::error::CoreError;
use rokto_core::geo;
use rokto_core::requests::{EmergencyLevel, RequestStatus};
use rokto_core::types::DbId;
use rokto_db::models::blood_request::{BloodRequest, CreateBloodRequest};
use rokto_db::repositories::BloodRequestRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::load_profile;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Query / request types
// ---------------------------------------------------------------------------

/// Query parameters for `GET /requests`.
#[derive(Debug, Deserialize)]
pub struct RequestListQuery {
    /// Optional status filter (`open` or `fulfilled`).
    pub status: Option<String>,
    /// Maximum number of results. Defaults to 50, capped at 100.
    pub limit: Option<i64>,
    /// Number of results to skip. Defaults to 0.
    pub offset: Option<i64>,
}

/// Maximum page size for request listing.
const MAX_LIMIT: i64 = 100;

/// Default page size for request listing.
const DEFAULT_LIMIT: i64 = 50;

/// Owner-or-admin guard for status flips and deletion.
fn authorize_requester(auth: &AuthUser, request: &BloodRequest) -> AppResult<()> {
    if auth.user_id != request.requester_id && !auth.is_admin() {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the requester or an admin may modify a request".into(),
        )));
    }
    Ok(())
}

async fn load_request(state: &AppState, id: DbId) -> AppResult<BloodRequest> {
    BloodRequestRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "BloodRequest",
            id,
        }))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/requests
///
/// Create a blood request, then fan out notifications to every matching
/// donor. The fan-out's outcome never affects the response: partial or
/// zero delivery still returns 201 with the created request.
pub async fn create_request(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateBloodRequest>,
) -> AppResult<impl IntoResponse> {
    let blood_group: BloodGroup = input.blood_group.parse()?;
    input.emergency_level.parse::<EmergencyLevel>()?;

    if !geo::is_known_division(&input.division) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Unknown division: {}",
            input.division
        ))));
    }
    if !geo::is_known_district(&input.district) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Unknown district: {}",
            input.district
        ))));
    }
    if input.contact_phone.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "contact_phone must not be empty".into(),
        )));
    }

    let requester = load_profile(&state.pool, auth.user_id).await?;
    let request =
        BloodRequestRepo::create(&state.pool, requester.id, &requester.name, &input).await?;

    // Lookup and fan-out happen strictly after the request write; the
    // matcher swallows its own failures.
    state
        .matcher
        .notify_matching_donors(blood_group, &request.district, request.id)
        .await;

    Ok((StatusCode::CREATED, Json(DataResponse { data: request })))
}

/// GET /api/v1/requests
pub async fn list_requests(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<RequestListQuery>,
) -> AppResult<Json<DataResponse<Vec<BloodRequest>>>> {
    let status = params
        .status
        .as_deref()
        .map(str::parse::<RequestStatus>)
        .transpose()?;
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);
    let offset = params.offset.unwrap_or(0);

    let requests = BloodRequestRepo::list(&state.pool, status, limit, offset).await?;
    Ok(Json(DataResponse { data: requests }))
}

/// GET /api/v1/requests/{id}
pub async fn get_request(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<BloodRequest>>> {
    let request = load_request(&state, id).await?;
    Ok(Json(DataResponse { data: request }))
}

/// POST /api/v1/requests/{id}/fulfill
///
/// One-way status flip, by the requester or an admin. Fulfilling an
/// already-fulfilled request is a no-op success; there is no way back
/// to `open`.
pub async fn fulfill_request(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let request = load_request(&state, id).await?;
    authorize_requester(&auth, &request)?;

    BloodRequestRepo::mark_fulfilled(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/requests/{id}
///
/// Remove a request. Owner or admin only.
pub async fn delete_request(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let request = load_request(&state, id).await?;
    authorize_requester(&auth, &request)?;

    BloodRequestRepo::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
