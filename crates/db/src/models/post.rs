//! Social feed models.

use serde::Serialize;
use sqlx::FromRow;

use rokto_core::types::{DbId, Timestamp};

/// A row from the `posts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Post {
    pub id: DbId,
    pub author_id: DbId,
    pub author_name: String,
    pub content: String,
    pub like_count: i64,
    pub comment_count: i64,
    pub created_at: Timestamp,
}

/// A row from the `post_comments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Comment {
    pub id: DbId,
    pub post_id: DbId,
    pub author_id: DbId,
    pub author_name: String,
    pub content: String,
    pub created_at: Timestamp,
}
