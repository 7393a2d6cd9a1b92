//! Repository for the `profiles` table.

use sqlx::PgPool;

use rokto_core::blood::BloodGroup;
use rokto_core::roles::ROLE_DONOR;
use rokto_core::types::DbId;

use crate::models::profile::{CreateProfile, Profile, UpdateProfile};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, email, phone, blood_group, division, district, upazila, \
                       is_available, is_verified, role, donation_count, last_donation_date, \
                       photo_url, created_at, updated_at";

/// Provides CRUD operations for profiles.
pub struct ProfileRepo;

impl ProfileRepo {
    /// Insert a new profile, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateProfile) -> Result<Profile, sqlx::Error> {
        let query = format!(
            "INSERT INTO profiles (name, email, phone, blood_group, division, district, upazila, role)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Profile>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.blood_group)
            .bind(&input.division)
            .bind(&input.district)
            .bind(&input.upazila)
            .bind(&input.role)
            .fetch_one(pool)
            .await
    }

    /// Find a profile by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Profile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM profiles WHERE id = $1");
        sqlx::query_as::<_, Profile>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Update a profile. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProfile,
    ) -> Result<Option<Profile>, sqlx::Error> {
        let query = format!(
            "UPDATE profiles SET
                name = COALESCE($2, name),
                phone = COALESCE($3, phone),
                blood_group = COALESCE($4, blood_group),
                division = COALESCE($5, division),
                district = COALESCE($6, district),
                upazila = COALESCE($7, upazila),
                is_available = COALESCE($8, is_available),
                last_donation_date = COALESCE($9, last_donation_date),
                donation_count = COALESCE($10, donation_count),
                photo_url = COALESCE($11, photo_url),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Profile>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.phone)
            .bind(&input.blood_group)
            .bind(&input.division)
            .bind(&input.district)
            .bind(&input.upazila)
            .bind(input.is_available)
            .bind(input.last_donation_date)
            .bind(input.donation_count)
            .bind(&input.photo_url)
            .fetch_optional(pool)
            .await
    }

    /// Flip the donor's availability switch.
    ///
    /// Returns `true` if the row was updated.
    pub async fn set_availability(
        pool: &PgPool,
        id: DbId,
        is_available: bool,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE profiles SET is_available = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(is_available)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Donor lookup for the matcher fan-out.
    ///
    /// Exact equality on all four predicates: role, availability, blood
    /// group symbol, and district. No compatibility expansion, no radius.
    pub async fn find_available_donors(
        pool: &PgPool,
        blood_group: BloodGroup,
        district: &str,
    ) -> Result<Vec<Profile>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM profiles \
             WHERE role = $1 AND is_available = true \
               AND blood_group = $2 AND district = $3"
        );
        sqlx::query_as::<_, Profile>(&query)
            .bind(ROLE_DONOR)
            .bind(blood_group.as_str())
            .bind(district)
            .fetch_all(pool)
            .await
    }

    /// Donor search for the discovery page.
    ///
    /// Equality filters on blood group and district, optionally narrowed
    /// to a division. Only available donors are returned.
    pub async fn search_donors(
        pool: &PgPool,
        blood_group: BloodGroup,
        district: &str,
        division: Option<&str>,
    ) -> Result<Vec<Profile>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM profiles \
             WHERE role = $1 AND is_available = true \
               AND blood_group = $2 AND district = $3 \
               AND ($4::text IS NULL OR division = $4) \
             ORDER BY donation_count DESC, created_at ASC"
        );
        sqlx::query_as::<_, Profile>(&query)
            .bind(ROLE_DONOR)
            .bind(blood_group.as_str())
            .bind(district)
            .bind(division)
            .fetch_all(pool)
            .await
    }

    /// List all profiles, most recently created first (admin console).
    pub async fn list(pool: &PgPool, limit: i64, offset: i64) -> Result<Vec<Profile>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM profiles ORDER BY created_at DESC LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, Profile>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Mark a profile as verified (admin console).
    ///
    /// Returns `true` if the row was updated.
    pub async fn set_verified(pool: &PgPool, id: DbId, verified: bool) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE profiles SET is_verified = $2, updated_at = NOW() WHERE id = $1")
                .bind(id)
                .bind(verified)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Count all profiles (admin stats).
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let count: Option<i64> = sqlx::query_scalar("SELECT COUNT(*) FROM profiles")
            .fetch_one(pool)
            .await?;
        Ok(count.unwrap_or(0))
    }

    /// Count available donors (admin stats).
    pub async fn count_available_donors(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let count: Option<i64> = sqlx::query_scalar(
            "SELECT COUNT(*) FROM profiles WHERE role = $1 AND is_available = true",
        )
        .bind(ROLE_DONOR)
        .fetch_one(pool)
        .await?;
        Ok(count.unwrap_or(0))
    }
}
