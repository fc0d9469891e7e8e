use axum::{Json, extract::State, http::StatusCode};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::comment::{Comment, CommentDraft};
use crate::presentation::AppState;
use crate::presentation::app_error::AppResult;
use crate::presentation::extract::{AppJson, AppPath};
use crate::presentation::middleware::auth::AuthenticatedUser;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct CommentInputDto {
    #[validate(length(min = 1))]
    pub(crate) body: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CommentDto {
    pub(crate) id: i64,
    pub(crate) body: String,
    pub(crate) post_id: i64,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
    pub(crate) author_id: i64,
    pub(crate) author_username: String,
    pub(crate) author_name: String,
}

impl From<Comment> for CommentDto {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id,
            body: comment.body,
            post_id: comment.post_id,
            created_at: comment.created_at,
            updated_at: comment.updated_at,
            author_id: comment.author.id,
            author_username: comment.author.username,
            author_name: comment.author.name,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/posts/{id}/comments",
    tag = "comments",
    params(("id" = i64, Path, description = "Post id")),
    responses(
        (status = 200, description = "Comments of the post", body = [CommentDto]),
        (status = 404, description = "Post not found")
    )
)]
pub(crate) async fn list_comments(
    State(state): State<AppState>,
    AppPath(post_id): AppPath<i64>,
) -> AppResult<Json<Vec<CommentDto>>> {
    let comments = state.comment_service.get_comments_by_post_id(post_id).await?;
    Ok(Json(comments.into_iter().map(CommentDto::from).collect()))
}

#[utoipa::path(
    get,
    path = "/api/posts/{id}/comments/{comment_id}",
    tag = "comments",
    params(
        ("id" = i64, Path, description = "Post id"),
        ("comment_id" = i64, Path, description = "Comment id")
    ),
    responses(
        (status = 200, description = "Comment found", body = CommentDto),
        (status = 400, description = "Comment does not belong to post"),
        (status = 404, description = "Post or comment not found")
    )
)]
pub(crate) async fn get_comment(
    State(state): State<AppState>,
    AppPath((post_id, comment_id)): AppPath<(i64, i64)>,
) -> AppResult<Json<CommentDto>> {
    let comment = state
        .comment_service
        .get_comment_by_id(post_id, comment_id)
        .await?;
    Ok(Json(comment.into()))
}

#[utoipa::path(
    post,
    path = "/api/posts/{id}/comments",
    tag = "comments",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Post id")),
    request_body = CommentInputDto,
    responses(
        (status = 201, description = "Comment created", body = CommentDto),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Post not found")
    )
)]
pub(crate) async fn create_comment(
    State(state): State<AppState>,
    AuthenticatedUser(actor): AuthenticatedUser,
    AppPath(post_id): AppPath<i64>,
    AppJson(dto): AppJson<CommentInputDto>,
) -> AppResult<(StatusCode, Json<CommentDto>)> {
    dto.validate()?;

    let comment = state
        .comment_service
        .create_comment(&actor, post_id, CommentDraft { body: dto.body })
        .await?;
    Ok((StatusCode::CREATED, Json(comment.into())))
}

#[utoipa::path(
    put,
    path = "/api/posts/{id}/comments/{comment_id}",
    tag = "comments",
    security(("bearer_auth" = [])),
    params(
        ("id" = i64, Path, description = "Post id"),
        ("comment_id" = i64, Path, description = "Comment id")
    ),
    request_body = CommentInputDto,
    responses(
        (status = 200, description = "Comment updated", body = CommentDto),
        (status = 400, description = "Validation error or comment of another post"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Post or comment not found")
    )
)]
pub(crate) async fn update_comment(
    State(state): State<AppState>,
    AuthenticatedUser(actor): AuthenticatedUser,
    AppPath((post_id, comment_id)): AppPath<(i64, i64)>,
    AppJson(dto): AppJson<CommentInputDto>,
) -> AppResult<Json<CommentDto>> {
    dto.validate()?;

    let comment = state
        .comment_service
        .update_comment(&actor, post_id, comment_id, CommentDraft { body: dto.body })
        .await?;
    Ok(Json(comment.into()))
}

#[utoipa::path(
    delete,
    path = "/api/posts/{id}/comments/{comment_id}",
    tag = "comments",
    security(("bearer_auth" = [])),
    params(
        ("id" = i64, Path, description = "Post id"),
        ("comment_id" = i64, Path, description = "Comment id")
    ),
    responses(
        (status = 200, description = "Comment deleted", body = String),
        (status = 400, description = "Comment of another post"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Post or comment not found")
    )
)]
pub(crate) async fn delete_comment(
    State(state): State<AppState>,
    AuthenticatedUser(actor): AuthenticatedUser,
    AppPath((post_id, comment_id)): AppPath<(i64, i64)>,
) -> AppResult<String> {
    state
        .comment_service
        .delete_comment(&actor, post_id, comment_id)
        .await?;
    Ok("Comment deleted successfully".to_string())
}
