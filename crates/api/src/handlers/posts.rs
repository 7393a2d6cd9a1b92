//! Handlers for the `/posts` social feed.
//!
//! Likes and comments mint a notification for the post author through the
//! notification service. Those writes are best-effort: a failed
//! notification is logged and the interaction still succeeds.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use validator::Validate;

use rokto_core::error::CoreError;
use rokto_core::kinds::KIND_SOCIAL;
use rokto_core::types::DbId;
use rokto_db::models::post::{Comment, Post};
use rokto_db::repositories::PostRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::load_profile;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /posts`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreatePostRequest {
    #[validate(length(min = 1, max = 5000))]
    pub content: String,
}

/// Request body for `POST /posts/{id}/comments`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCommentRequest {
    #[validate(length(min = 1, max = 2000))]
    pub content: String,
}

/// Query parameters for `GET /posts`.
#[derive(Debug, Deserialize)]
pub struct PostListQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

const MAX_LIMIT: i64 = 100;
const DEFAULT_LIMIT: i64 = 20;

async fn load_post(state: &AppState, id: DbId) -> AppResult<Post> {
    PostRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Post", id }))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/posts
pub async fn create_post(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreatePostRequest>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let author = load_profile(&state.pool, auth.user_id).await?;
    let post = PostRepo::create(&state.pool, author.id, &author.name, &input.content).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: post })))
}

/// GET /api/v1/posts
pub async fn list_posts(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<PostListQuery>,
) -> AppResult<Json<DataResponse<Vec<Post>>>> {
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);
    let offset = params.offset.unwrap_or(0);

    let posts = PostRepo::list(&state.pool, limit, offset).await?;
    Ok(Json(DataResponse { data: posts }))
}

/// POST /api/v1/posts/{id}/like
///
/// One like per user per post. The second like from the same user is a
/// no-op success and does not re-notify the author.
pub async fn like_post(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let post = load_post(&state, id).await?;
    let liker = load_profile(&state.pool, auth.user_id).await?;

    let newly_liked = PostRepo::like(&state.pool, id, liker.id).await?;
    if newly_liked && post.author_id != liker.id {
        let body = format!("{} liked your post.", liker.name);
        if let Err(e) = state
            .notifier
            .create(post.author_id, "New Like", &body, KIND_SOCIAL, None)
            .await
        {
            tracing::error!(post_id = id, error = %e, "Failed to notify post author of like");
        }
    }

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/posts/{id}/comments
pub async fn add_comment(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<CreateCommentRequest>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let post = load_post(&state, id).await?;
    let commenter = load_profile(&state.pool, auth.user_id).await?;

    let comment =
        PostRepo::add_comment(&state.pool, id, commenter.id, &commenter.name, &input.content)
            .await?;

    if post.author_id != commenter.id {
        let body = format!("{} commented on your post.", commenter.name);
        if let Err(e) = state
            .notifier
            .create(post.author_id, "New Comment", &body, KIND_SOCIAL, None)
            .await
        {
            tracing::error!(post_id = id, error = %e, "Failed to notify post author of comment");
        }
    }

    Ok((StatusCode::CREATED, Json(DataResponse { data: comment })))
}

/// GET /api/v1/posts/{id}/comments
pub async fn list_comments(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Comment>>>> {
    load_post(&state, id).await?;
    let comments = PostRepo::list_comments(&state.pool, id).await?;
    Ok(Json(DataResponse { data: comments }))
}
