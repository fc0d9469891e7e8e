use axum::{Json, extract::State};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::role::RoleName;
use crate::domain::user::User;
use crate::presentation::AppState;
use crate::presentation::app_error::AppResult;
use crate::presentation::extract::AppQuery;
use crate::presentation::handlers::posts::{PageQuery, PostResponseDto};
use crate::presentation::middleware::auth::AuthenticatedUser;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UserDto {
    pub(crate) id: i64,
    pub(crate) username: String,
    pub(crate) name: String,
    pub(crate) email: String,
    #[schema(value_type = Vec<String>)]
    pub(crate) roles: Vec<RoleName>,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            name: user.name,
            email: user.email,
            roles: user.roles,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/users/me",
    tag = "users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Profile of the caller", body = UserDto),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User no longer exists")
    )
)]
pub(crate) async fn me(
    State(state): State<AppState>,
    AuthenticatedUser(actor): AuthenticatedUser,
) -> AppResult<Json<UserDto>> {
    let user = state.auth_service.profile(&actor.username).await?;
    Ok(Json(user.into()))
}

#[utoipa::path(
    get,
    path = "/api/users/me/posts",
    tag = "users",
    security(("bearer_auth" = [])),
    params(PageQuery),
    responses(
        (status = 200, description = "Posts written by the caller", body = PostResponseDto),
        (status = 400, description = "Invalid paging or sort parameters"),
        (status = 401, description = "Unauthorized")
    )
)]
pub(crate) async fn my_posts(
    State(state): State<AppState>,
    AuthenticatedUser(actor): AuthenticatedUser,
    AppQuery(query): AppQuery<PageQuery>,
) -> AppResult<Json<PostResponseDto>> {
    let page = query.into_page_request("createdAt")?;
    let result = state.post_service.get_my_posts(&actor.username, page).await?;
    Ok(Json(result.into()))
}
