use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::auth_service::AuthResult;
use crate::domain::user::{LoginRequest, RegisterRequest};
use crate::presentation::AppState;
use crate::presentation::app_error::AppResult;
use crate::presentation::extract::AppJson;

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RegisterDto {
    #[validate(length(min = 1, max = 100))]
    pub(crate) name: String,
    #[validate(length(min = 3, max = 64))]
    pub(crate) username: String,
    #[validate(email)]
    pub(crate) email: String,
    #[validate(length(min = 8, max = 128))]
    pub(crate) password: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LoginDto {
    #[validate(length(min = 1, max = 255))]
    pub(crate) username_or_email: String,
    #[validate(length(min = 1))]
    pub(crate) password: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct JwtAuthResponseDto {
    pub(crate) access_token: String,
    pub(crate) token_type: String,
    pub(crate) user_id: i64,
    pub(crate) username: String,
    pub(crate) name: String,
    pub(crate) email: String,
}

impl From<AuthResult> for JwtAuthResponseDto {
    fn from(result: AuthResult) -> Self {
        Self {
            access_token: result.access_token,
            token_type: "Bearer".to_string(),
            user_id: result.user.id,
            username: result.user.username,
            name: result.user.name,
            email: result.user.email,
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "auth",
    request_body = RegisterDto,
    responses(
        (status = 201, description = "Registered successfully", body = String),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Username or email already taken"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn register(
    State(state): State<AppState>,
    AppJson(dto): AppJson<RegisterDto>,
) -> AppResult<(StatusCode, String)> {
    dto.validate()?;

    let req = RegisterRequest {
        name: dto.name,
        username: dto.username,
        email: dto.email,
        password: dto.password,
    };

    let message = state.auth_service.register(req).await?;
    Ok((StatusCode::CREATED, message))
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "auth",
    request_body = LoginDto,
    responses(
        (status = 200, description = "Login successful", body = JwtAuthResponseDto),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid credentials"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn login(
    State(state): State<AppState>,
    AppJson(dto): AppJson<LoginDto>,
) -> AppResult<Json<JwtAuthResponseDto>> {
    dto.validate()?;

    let req = LoginRequest {
        username_or_email: dto.username_or_email,
        password: dto.password,
    };

    let result = state.auth_service.login(req).await?;
    Ok(Json(result.into()))
}
