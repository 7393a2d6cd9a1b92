//! Handlers for the `/donors` discovery resource.

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use rokto_core::blood::BloodGroup;
use rokto_core::error::CoreError;
use rokto_core::geo;
use rokto_db::models::profile::Profile;
use rokto_db::repositories::ProfileRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for `GET /donors`.
#[derive(Debug, Deserialize)]
pub struct DonorSearchQuery {
    pub blood_group: String,
    pub district: String,
    pub division: Option<String>,
}

/// GET /api/v1/donors
///
/// Equality-filtered donor search: available donors with exactly the given
/// blood group in exactly the given district, optionally narrowed to a
/// division. Same predicates the matcher uses; no compatibility expansion.
pub async fn search_donors(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<DonorSearchQuery>,
) -> AppResult<Json<DataResponse<Vec<Profile>>>> {
    let blood_group: BloodGroup = params.blood_group.parse()?;

    if !geo::is_known_district(&params.district) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Unknown district: {}",
            params.district
        ))));
    }

    let donors = ProfileRepo::search_donors(
        &state.pool,
        blood_group,
        &params.district,
        params.division.as_deref(),
    )
    .await?;

    Ok(Json(DataResponse { data: donors }))
}
