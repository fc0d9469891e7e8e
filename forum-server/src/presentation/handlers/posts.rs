use axum::{Json, extract::State, http::StatusCode};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::domain::page::{Page, PageRequest};
use crate::domain::post::{Post, PostDraft};
use crate::presentation::AppState;
use crate::presentation::app_error::AppResult;
use crate::presentation::extract::{AppJson, AppPath, AppQuery};
use crate::presentation::middleware::auth::AuthenticatedUser;

pub(crate) const DEFAULT_PAGE_SIZE: u32 = 10;

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PostInputDto {
    #[validate(length(min = 2, max = 255))]
    pub(crate) title: String,
    #[validate(length(min = 10))]
    pub(crate) description: String,
    #[validate(length(min = 1))]
    pub(crate) content: String,
    #[validate(range(min = 1))]
    pub(crate) category_id: Option<i64>,
}

impl From<PostInputDto> for PostDraft {
    fn from(dto: PostInputDto) -> Self {
        Self {
            title: dto.title,
            description: dto.description,
            content: dto.content,
            category_id: dto.category_id,
        }
    }
}

#[derive(Debug, Deserialize, Validate, IntoParams, ToSchema)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub(crate) struct PageQuery {
    /// Zero-based page number.
    pub(crate) page_no: Option<u32>,
    #[validate(range(min = 1, max = 100))]
    pub(crate) page_size: Option<u32>,
    /// One of `id`, `title`, `createdAt`, `updatedAt`.
    pub(crate) sort_by: Option<String>,
    /// `asc` sorts ascending; anything else sorts descending.
    pub(crate) sort_dir: Option<String>,
}

impl PageQuery {
    pub(crate) fn into_page_request(self, default_sort_by: &str) -> AppResult<PageRequest> {
        self.validate()?;
        let page = PageRequest::new(
            self.page_no.unwrap_or(0),
            self.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
            self.sort_by.as_deref().unwrap_or(default_sort_by),
            self.sort_dir.as_deref().unwrap_or("desc"),
        )?;
        Ok(page)
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PostDto {
    pub(crate) id: i64,
    pub(crate) title: String,
    pub(crate) description: String,
    pub(crate) content: String,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
    pub(crate) author_id: i64,
    pub(crate) author_username: String,
    pub(crate) author_name: String,
    pub(crate) category_id: i64,
}

impl From<Post> for PostDto {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            title: post.title,
            description: post.description,
            content: post.content,
            created_at: post.created_at,
            updated_at: post.updated_at,
            author_id: post.author.id,
            author_username: post.author.username,
            author_name: post.author.name,
            category_id: post.category_id,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PostResponseDto {
    pub(crate) content: Vec<PostDto>,
    pub(crate) page_no: u32,
    pub(crate) page_size: u32,
    pub(crate) total_elements: u64,
    pub(crate) total_pages: u32,
    pub(crate) last: bool,
}

impl From<Page<Post>> for PostResponseDto {
    fn from(page: Page<Post>) -> Self {
        let page = page.map(PostDto::from);
        Self {
            content: page.content,
            page_no: page.page_no,
            page_size: page.page_size,
            total_elements: page.total_elements,
            total_pages: page.total_pages,
            last: page.last,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/posts",
    tag = "posts",
    params(PageQuery),
    responses(
        (status = 200, description = "Posts listed", body = PostResponseDto),
        (status = 400, description = "Invalid paging or sort parameters"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn list_posts(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<PageQuery>,
) -> AppResult<Json<PostResponseDto>> {
    let page = query.into_page_request("id")?;
    let result = state.post_service.get_all_posts(page).await?;

    Ok(Json(result.into()))
}

#[utoipa::path(
    get,
    path = "/api/posts/{id}",
    tag = "posts",
    params(("id" = i64, Path, description = "Post id")),
    responses(
        (status = 200, description = "Post found", body = PostDto),
        (status = 404, description = "Post not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn get_post(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> AppResult<Json<PostDto>> {
    let post = state.post_service.get_post_by_id(id).await?;

    Ok(Json(post.into()))
}

#[utoipa::path(
    get,
    path = "/api/posts/category/{id}",
    tag = "posts",
    params(("id" = i64, Path, description = "Category id")),
    responses(
        (status = 200, description = "Posts in the category", body = [PostDto]),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn list_posts_by_category(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> AppResult<Json<Vec<PostDto>>> {
    let posts = state.post_service.get_posts_by_category(id).await?;

    Ok(Json(posts.into_iter().map(PostDto::from).collect()))
}

#[utoipa::path(
    post,
    path = "/api/posts",
    tag = "posts",
    security(("bearer_auth" = [])),
    request_body = PostInputDto,
    responses(
        (status = 201, description = "Post created", body = PostDto),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Category not found"),
        (status = 409, description = "Title already used"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn create_post(
    State(state): State<AppState>,
    AuthenticatedUser(actor): AuthenticatedUser,
    AppJson(dto): AppJson<PostInputDto>,
) -> AppResult<(StatusCode, Json<PostDto>)> {
    dto.validate()?;

    let post = state.post_service.create_post(&actor, dto.into()).await?;
    Ok((StatusCode::CREATED, Json(post.into())))
}

#[utoipa::path(
    put,
    path = "/api/posts/{id}",
    tag = "posts",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Post id")),
    request_body = PostInputDto,
    responses(
        (status = 200, description = "Post updated", body = PostDto),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Post not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn update_post(
    State(state): State<AppState>,
    AuthenticatedUser(actor): AuthenticatedUser,
    AppPath(id): AppPath<i64>,
    AppJson(dto): AppJson<PostInputDto>,
) -> AppResult<Json<PostDto>> {
    dto.validate()?;

    let post = state
        .post_service
        .update_post(&actor, id, dto.into())
        .await?;
    Ok(Json(post.into()))
}

#[utoipa::path(
    delete,
    path = "/api/posts/{id}",
    tag = "posts",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Post id")),
    responses(
        (status = 200, description = "Post deleted", body = String),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Post not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn delete_post(
    State(state): State<AppState>,
    AuthenticatedUser(actor): AuthenticatedUser,
    AppPath(id): AppPath<i64>,
) -> AppResult<String> {
    state.post_service.delete_post_by_id(&actor, id).await?;
    Ok("Post entity deleted successfully.".to_string())
}
