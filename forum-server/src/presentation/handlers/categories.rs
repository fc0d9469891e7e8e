use axum::{Json, extract::State};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::category::Category;
use crate::presentation::AppState;
use crate::presentation::app_error::AppResult;
use crate::presentation::extract::AppPath;
use crate::presentation::middleware::auth::AuthenticatedUser;

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct CategoryDto {
    pub(crate) id: i64,
    pub(crate) name: String,
    pub(crate) description: String,
}

impl From<Category> for CategoryDto {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
            description: category.description,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/categories",
    tag = "categories",
    responses(
        (status = 200, description = "Preset categories", body = [CategoryDto]),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn list_categories(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<CategoryDto>>> {
    let categories = state.category_service.get_all_categories().await?;
    Ok(Json(categories.into_iter().map(CategoryDto::from).collect()))
}

#[utoipa::path(
    get,
    path = "/api/v1/categories/{id}",
    tag = "categories",
    params(("id" = i64, Path, description = "Category id")),
    responses(
        (status = 200, description = "Category found", body = CategoryDto),
        (status = 404, description = "Category not found")
    )
)]
pub(crate) async fn get_category(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> AppResult<Json<CategoryDto>> {
    let category = state.category_service.get_category(id).await?;
    Ok(Json(category.into()))
}

#[utoipa::path(
    post,
    path = "/api/v1/categories",
    tag = "categories",
    security(("bearer_auth" = [])),
    responses(
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Categories are preset")
    )
)]
pub(crate) async fn add_category(
    State(state): State<AppState>,
    AuthenticatedUser(actor): AuthenticatedUser,
) -> AppResult<Json<CategoryDto>> {
    let category = state.category_service.add_category(&actor)?;
    Ok(Json(category.into()))
}

#[utoipa::path(
    put,
    path = "/api/v1/categories/{id}",
    tag = "categories",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Category id")),
    responses(
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Categories are preset")
    )
)]
pub(crate) async fn update_category(
    State(state): State<AppState>,
    AuthenticatedUser(actor): AuthenticatedUser,
    AppPath(id): AppPath<i64>,
) -> AppResult<Json<CategoryDto>> {
    let category = state.category_service.update_category(&actor, id)?;
    Ok(Json(category.into()))
}

#[utoipa::path(
    delete,
    path = "/api/v1/categories/{id}",
    tag = "categories",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Category id")),
    responses(
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Categories are preset")
    )
)]
pub(crate) async fn delete_category(
    State(state): State<AppState>,
    AuthenticatedUser(actor): AuthenticatedUser,
    AppPath(id): AppPath<i64>,
) -> AppResult<String> {
    state.category_service.delete_category(&actor, id)?;
    Ok("Category deleted successfully.".to_string())
}
