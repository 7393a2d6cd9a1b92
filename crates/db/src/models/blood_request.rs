//! Blood request entity model and DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use rokto_core::types::{DbId, Timestamp};

/// A row from the `blood_requests` table.
///
/// `status` is one-directional: `open` -> `fulfilled`, flipped by the
/// requester or an admin. Fulfilled is terminal.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct BloodRequest {
    pub id: DbId,
    pub requester_id: DbId,
    pub requester_name: String,
    pub blood_group: String,
    /// Severity tag: `normal`, `urgent`, or `critical`. Sorting only;
    /// no automated escalation is attached to it.
    pub emergency_level: String,
    pub hospital_name: String,
    pub division: String,
    pub district: String,
    pub required_date: Option<NaiveDate>,
    pub status: String,
    pub note: Option<String>,
    pub contact_phone: String,
    pub created_at: Timestamp,
}

/// DTO for creating a blood request.
#[derive(Debug, Deserialize)]
pub struct CreateBloodRequest {
    pub blood_group: String,
    pub emergency_level: String,
    pub hospital_name: String,
    pub division: String,
    pub district: String,
    pub required_date: Option<NaiveDate>,
    pub note: Option<String>,
    pub contact_phone: String,
}
