//! Handlers for the `/profiles` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use validator::Validate;

use rokto_core::blood::BloodGroup;
use rokto_core::error::CoreError;
use rokto_core::geo;
use rokto_core::roles::{ROLE_DONOR, ROLE_RECEIVER};
use rokto_core::types::DbId;
use rokto_db::models::profile::{CreateProfile, Profile, UpdateProfile};
use rokto_db::repositories::ProfileRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::load_profile;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /profiles`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateProfileRequest {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6, max = 20))]
    pub phone: String,
    pub blood_group: String,
    pub division: String,
    pub district: String,
    #[validate(length(min = 1, max = 120))]
    pub upazila: String,
    pub role: String,
}

/// Request body for `PUT /profiles/{id}/availability`.
#[derive(Debug, Deserialize)]
pub struct AvailabilityRequest {
    pub is_available: bool,
}

/// Reject location values that are not in the geography tables.
fn validate_location(division: &str, district: &str) -> AppResult<()> {
    if !geo::is_known_division(division) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Unknown division: {division}"
        ))));
    }
    if !geo::districts_of(division).contains(&district) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Unknown district {district} in division {division}"
        ))));
    }
    Ok(())
}

/// Owner-or-admin guard shared by the mutating profile endpoints.
fn authorize_owner(auth: &AuthUser, profile_id: DbId) -> AppResult<()> {
    if auth.user_id != profile_id && !auth.is_admin() {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the profile owner or an admin may modify a profile".into(),
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/profiles
///
/// Create the caller's profile at first authentication. Admin accounts are
/// provisioned out of band, so the role must be donor or receiver.
pub async fn create_profile(
    _auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateProfileRequest>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    input.blood_group.parse::<BloodGroup>()?;
    validate_location(&input.division, &input.district)?;

    if input.role != ROLE_DONOR && input.role != ROLE_RECEIVER {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Role must be {ROLE_DONOR} or {ROLE_RECEIVER}, got {}",
            input.role
        ))));
    }

    let create = CreateProfile {
        name: input.name,
        email: input.email,
        phone: input.phone,
        blood_group: input.blood_group,
        division: input.division,
        district: input.district,
        upazila: input.upazila,
        role: input.role,
    };
    let profile = ProfileRepo::create(&state.pool, &create).await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: profile })))
}

/// GET /api/v1/profiles/me
pub async fn get_me(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Profile>>> {
    let profile = load_profile(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: profile }))
}

/// GET /api/v1/profiles/{id}
pub async fn get_profile(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Profile>>> {
    let profile = load_profile(&state.pool, id).await?;
    Ok(Json(DataResponse { data: profile }))
}

/// PUT /api/v1/profiles/{id}
///
/// Patch a profile. Owner or admin only; location and blood group changes
/// are validated against the domain tables.
pub async fn update_profile(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProfile>,
) -> AppResult<Json<DataResponse<Profile>>> {
    authorize_owner(&auth, id)?;

    if let Some(group) = &input.blood_group {
        group.parse::<BloodGroup>()?;
    }
    // Location fields must move together so the pair stays consistent.
    match (&input.division, &input.district) {
        (Some(division), Some(district)) => validate_location(division, district)?,
        (None, None) => {}
        _ => {
            return Err(AppError::Core(CoreError::Validation(
                "division and district must be updated together".into(),
            )))
        }
    }

    let profile = ProfileRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Profile",
            id,
        }))?;
    Ok(Json(DataResponse { data: profile }))
}

/// PUT /api/v1/profiles/{id}/availability
///
/// Flip the donor's availability switch. Owner or admin only. Independent
/// of donation history: turning it on makes the donor matchable
/// immediately.
pub async fn set_availability(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<AvailabilityRequest>,
) -> AppResult<impl IntoResponse> {
    authorize_owner(&auth, id)?;

    let found = ProfileRepo::set_availability(&state.pool, id, input.is_available).await?;
    if !found {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Profile",
            id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}
