use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::presentation::handlers::auth::{JwtAuthResponseDto, LoginDto, RegisterDto};
use crate::presentation::handlers::categories::CategoryDto;
use crate::presentation::handlers::comments::{CommentDto, CommentInputDto};
use crate::presentation::handlers::posts::{PageQuery, PostDto, PostInputDto, PostResponseDto};
use crate::presentation::handlers::users::UserDto;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::presentation::handlers::auth::register,
        crate::presentation::handlers::auth::login,
        crate::presentation::handlers::posts::list_posts,
        crate::presentation::handlers::posts::get_post,
        crate::presentation::handlers::posts::list_posts_by_category,
        crate::presentation::handlers::posts::create_post,
        crate::presentation::handlers::posts::update_post,
        crate::presentation::handlers::posts::delete_post,
        crate::presentation::handlers::comments::list_comments,
        crate::presentation::handlers::comments::get_comment,
        crate::presentation::handlers::comments::create_comment,
        crate::presentation::handlers::comments::update_comment,
        crate::presentation::handlers::comments::delete_comment,
        crate::presentation::handlers::users::me,
        crate::presentation::handlers::users::my_posts,
        crate::presentation::handlers::categories::list_categories,
        crate::presentation::handlers::categories::get_category,
        crate::presentation::handlers::categories::add_category,
        crate::presentation::handlers::categories::update_category,
        crate::presentation::handlers::categories::delete_category
    ),
    components(
        schemas(
            RegisterDto,
            LoginDto,
            JwtAuthResponseDto,
            UserDto,
            PostInputDto,
            PageQuery,
            PostDto,
            PostResponseDto,
            CommentInputDto,
            CommentDto,
            CategoryDto
        )
    ),
    tags(
        (name = "auth", description = "Registration and login"),
        (name = "posts", description = "Post endpoints"),
        (name = "comments", description = "Comments under a post"),
        (name = "users", description = "The authenticated caller"),
        (name = "categories", description = "Preset categories")
    ),
    modifiers(&SecurityAddon)
)]
pub(crate) struct ApiDoc;

pub(crate) struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let mut components = openapi.components.take().unwrap_or_default();
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
        openapi.components = Some(components);
    }
}
