//! Notification entity model.
//!
//! Notification rows are append-only. Once created, a record is never
//! merged with or superseded by another; the only permitted mutation is
//! the read-flag flip, and there is no delete or expiry.

use serde::Serialize;
use sqlx::FromRow;

use rokto_core::types::{DbId, Timestamp};

/// A row from the `notifications` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Notification {
    pub id: DbId,
    /// The owning user; only this user (or an admin) may flip `is_read`.
    pub user_id: DbId,
    pub title: String,
    pub body: String,
    /// Kind tag: `request`, `match`, `social`, or `admin`.
    pub kind: String,
    pub is_read: bool,
    /// Set the first time the notification is marked read; re-marking
    /// does not move it.
    pub read_at: Option<Timestamp>,
    /// Optional navigation link for the client.
    pub link: Option<String>,
    pub created_at: Timestamp,
}
