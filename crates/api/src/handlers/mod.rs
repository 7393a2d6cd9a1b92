//! HTTP handlers, one module per resource.

pub mod admin;
pub mod donors;
pub mod notification;
pub mod posts;
pub mod profile;
pub mod requests;

use rokto_core::error::CoreError;
use rokto_core::types::DbId;
use rokto_db::models::profile::Profile;
use rokto_db::repositories::ProfileRepo;
use rokto_db::DbPool;

use crate::error::{AppError, AppResult};

/// Load a profile or fail with 404.
pub(crate) async fn load_profile(pool: &DbPool, id: DbId) -> AppResult<Profile> {
    ProfileRepo::find_by_id(pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Profile",
            id,
        }))
}
