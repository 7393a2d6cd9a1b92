//! Repository for the social feed tables (`posts`, `post_likes`,
//! `post_comments`).
//!
//! Like/comment counters are computed per query rather than stored, so the
//! feed never drifts from the underlying rows.

use sqlx::PgPool;

use rokto_core::types::DbId;

use crate::models::post::{Comment, Post};

/// Select list for posts with derived counters.
const POST_COLUMNS: &str = "p.id, p.author_id, p.author_name, p.content, \
     (SELECT COUNT(*) FROM post_likes l WHERE l.post_id = p.id) AS like_count, \
     (SELECT COUNT(*) FROM post_comments c WHERE c.post_id = p.id) AS comment_count, \
     p.created_at";

/// Provides operations for the social feed.
pub struct PostRepo;

impl PostRepo {
    /// Insert a new post, returning the created row.
    pub async fn create(
        pool: &PgPool,
        author_id: DbId,
        author_name: &str,
        content: &str,
    ) -> Result<Post, sqlx::Error> {
        let id: DbId = sqlx::query_scalar(
            "INSERT INTO posts (author_id, author_name, content) \
             VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(author_id)
        .bind(author_name)
        .bind(content)
        .fetch_one(pool)
        .await?;

        // Re-select through the counter view so the row shape matches list().
        Self::find_by_id(pool, id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    /// Find a post by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Post>, sqlx::Error> {
        let query = format!("SELECT {POST_COLUMNS} FROM posts p WHERE p.id = $1");
        sqlx::query_as::<_, Post>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List posts, newest first.
    pub async fn list(pool: &PgPool, limit: i64, offset: i64) -> Result<Vec<Post>, sqlx::Error> {
        let query = format!(
            "SELECT {POST_COLUMNS} FROM posts p ORDER BY p.created_at DESC LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, Post>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Record a like from `user_id` on `post_id`.
    ///
    /// Returns `true` if the like was inserted, `false` if this user had
    /// already liked the post (unique pair constraint).
    pub async fn like(pool: &PgPool, post_id: DbId, user_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO post_likes (post_id, user_id) VALUES ($1, $2) \
             ON CONFLICT (post_id, user_id) DO NOTHING",
        )
        .bind(post_id)
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Insert a comment, returning the created row.
    pub async fn add_comment(
        pool: &PgPool,
        post_id: DbId,
        author_id: DbId,
        author_name: &str,
        content: &str,
    ) -> Result<Comment, sqlx::Error> {
        sqlx::query_as::<_, Comment>(
            "INSERT INTO post_comments (post_id, author_id, author_name, content) \
             VALUES ($1, $2, $3, $4) \
             RETURNING id, post_id, author_id, author_name, content, created_at",
        )
        .bind(post_id)
        .bind(author_id)
        .bind(author_name)
        .bind(content)
        .fetch_one(pool)
        .await
    }

    /// List comments for a post, oldest first.
    pub async fn list_comments(pool: &PgPool, post_id: DbId) -> Result<Vec<Comment>, sqlx::Error> {
        sqlx::query_as::<_, Comment>(
            "SELECT id, post_id, author_id, author_name, content, created_at \
             FROM post_comments WHERE post_id = $1 ORDER BY created_at ASC",
        )
        .bind(post_id)
        .fetch_all(pool)
        .await
    }
}
