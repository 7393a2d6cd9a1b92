//! Repository for the `blood_requests` table.

use sqlx::PgPool;

use rokto_core::requests::RequestStatus;
use rokto_core::types::DbId;

use crate::models::blood_request::{BloodRequest, CreateBloodRequest};

/// Column list shared across queries.
const COLUMNS: &str = "id, requester_id, requester_name, blood_group, emergency_level, \
                       hospital_name, division, district, required_date, status, note, \
                       contact_phone, created_at";

/// Provides CRUD operations for blood requests.
pub struct BloodRequestRepo;

impl BloodRequestRepo {
    /// Insert a new request in `open` status, returning the created row.
    pub async fn create(
        pool: &PgPool,
        requester_id: DbId,
        requester_name: &str,
        input: &CreateBloodRequest,
    ) -> Result<BloodRequest, sqlx::Error> {
        let query = format!(
            "INSERT INTO blood_requests \
                (requester_id, requester_name, blood_group, emergency_level, hospital_name, \
                 division, district, required_date, note, contact_phone) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, BloodRequest>(&query)
            .bind(requester_id)
            .bind(requester_name)
            .bind(&input.blood_group)
            .bind(&input.emergency_level)
            .bind(&input.hospital_name)
            .bind(&input.division)
            .bind(&input.district)
            .bind(input.required_date)
            .bind(&input.note)
            .bind(&input.contact_phone)
            .fetch_one(pool)
            .await
    }

    /// Find a request by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<BloodRequest>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM blood_requests WHERE id = $1");
        sqlx::query_as::<_, BloodRequest>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List requests, newest first, optionally filtered by status.
    pub async fn list(
        pool: &PgPool,
        status: Option<RequestStatus>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<BloodRequest>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM blood_requests \
             WHERE ($1::text IS NULL OR status = $1) \
             ORDER BY created_at DESC \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, BloodRequest>(&query)
            .bind(status.map(|s| s.as_str()))
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Flip an open request to `fulfilled`.
    ///
    /// One-directional: only rows currently in `open` are touched, so a
    /// second fulfill is a no-op. Returns `true` if the row transitioned.
    pub async fn mark_fulfilled(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE blood_requests SET status = 'fulfilled' WHERE id = $1 AND status = 'open'",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete a request (requester or admin only, enforced by handlers).
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM blood_requests WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Count requests currently in `open` status (admin stats).
    pub async fn count_open(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let count: Option<i64> =
            sqlx::query_scalar("SELECT COUNT(*) FROM blood_requests WHERE status = 'open'")
                .fetch_one(pool)
                .await?;
        Ok(count.unwrap_or(0))
    }
}
