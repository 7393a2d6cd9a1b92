//! User profile entity model and DTOs.
//!
//! One profile exists per account, created at first authentication.
//! `is_available` is the donor's own switch; it is tracked independently
//! of the 90-day eligibility helper and is never auto-computed from
//! `last_donation_date`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use rokto_core::types::{DbId, Timestamp};

/// A row from the `profiles` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Profile {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub phone: String,
    /// Clinical blood group symbol, one of the eight ABO/Rh values.
    pub blood_group: String,
    pub division: String,
    pub district: String,
    pub upazila: String,
    pub is_available: bool,
    pub is_verified: bool,
    /// Role name: `donor`, `receiver`, or `admin`.
    pub role: String,
    pub donation_count: i32,
    pub last_donation_date: Option<NaiveDate>,
    pub photo_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a profile at first authentication.
#[derive(Debug, Deserialize)]
pub struct CreateProfile {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub blood_group: String,
    pub division: String,
    pub district: String,
    pub upazila: String,
    pub role: String,
}

/// DTO for patching a profile. Only non-`None` fields are applied.
#[derive(Debug, Deserialize)]
pub struct UpdateProfile {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub blood_group: Option<String>,
    pub division: Option<String>,
    pub district: Option<String>,
    pub upazila: Option<String>,
    pub is_available: Option<bool>,
    pub last_donation_date: Option<NaiveDate>,
    pub donation_count: Option<i32>,
    pub photo_url: Option<String>,
}
