use sqlx::PgPool;
use std::sync::Arc;

use crate::application::auth_service::AuthService;
use crate::application::category_service::CategoryService;
use crate::application::comment_service::CommentService;
use crate::application::post_service::PostService;
use crate::data::repositories::postgres::category_repository::PostgresCategoryRepository;
use crate::data::repositories::postgres::comment_repository::PostgresCommentRepository;
use crate::data::repositories::postgres::post_repository::PostgresPostRepository;
use crate::data::repositories::postgres::role_repository::PostgresRoleRepository;
use crate::data::repositories::postgres::user_repository::PostgresUserRepository;
use crate::infrastructure::jwt::JwtService;

pub(crate) mod app_error;
pub(crate) mod extract;
pub(crate) mod handlers;
pub(crate) mod http_handlers;
pub(crate) mod middleware;
pub(crate) mod openapi;
pub(crate) mod routes;

pub(crate) type PgAuthService = AuthService<PostgresUserRepository, PostgresRoleRepository>;
pub(crate) type PgPostService =
    PostService<PostgresPostRepository, PostgresCategoryRepository, PostgresUserRepository>;
pub(crate) type PgCommentService =
    CommentService<PostgresCommentRepository, PostgresPostRepository, PostgresUserRepository>;
pub(crate) type PgCategoryService = CategoryService<PostgresCategoryRepository>;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) pool: PgPool,
    pub(crate) auth_service: Arc<PgAuthService>,
    pub(crate) post_service: Arc<PgPostService>,
    pub(crate) comment_service: Arc<PgCommentService>,
    pub(crate) category_service: Arc<PgCategoryService>,
    pub(crate) jwt: Arc<JwtService>,
}

impl AppState {
    /// Wires every service against the given pool.
    pub(crate) fn new(pool: PgPool, jwt_secret: &str, jwt_ttl_seconds: i64) -> Self {
        let users = PostgresUserRepository::new(pool.clone());
        let roles = PostgresRoleRepository::new(pool.clone());
        let categories = PostgresCategoryRepository::new(pool.clone());
        let posts = PostgresPostRepository::new(pool.clone());
        let comments = PostgresCommentRepository::new(pool.clone());

        Self {
            auth_service: Arc::new(AuthService::new(
                users.clone(),
                roles,
                JwtService::new(jwt_secret, jwt_ttl_seconds),
            )),
            post_service: Arc::new(PostService::new(
                posts.clone(),
                categories.clone(),
                users.clone(),
            )),
            comment_service: Arc::new(CommentService::new(comments, posts, users)),
            category_service: Arc::new(CategoryService::new(categories)),
            jwt: Arc::new(JwtService::new(jwt_secret, jwt_ttl_seconds)),
            pool,
        }
    }
}
