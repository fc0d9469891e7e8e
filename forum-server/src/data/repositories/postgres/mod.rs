pub(crate) mod category_repository;
pub(crate) mod comment_repository;
pub(crate) mod post_repository;
pub(crate) mod role_repository;
pub(crate) mod user_repository;

use crate::domain::error::DomainError;

pub(crate) const UNIQUE_VIOLATION: &str = "23505";
pub(crate) const FOREIGN_KEY_VIOLATION: &str = "23503";

/// SQLSTATE and constraint name of a database-side failure, if any.
pub(crate) fn constraint_violation(err: &sqlx::Error) -> Option<(String, Option<String>)> {
    if let sqlx::Error::Database(db_err) = err
        && let Some(code) = db_err.code()
    {
        return Some((code.into_owned(), db_err.constraint().map(str::to_string)));
    }
    None
}

pub(crate) fn unexpected(err: sqlx::Error) -> DomainError {
    DomainError::Unexpected(err.to_string())
}

#[cfg(test)]
mod tests {
    use sqlx::PgPool;

    use super::category_repository::PostgresCategoryRepository;
    use super::comment_repository::PostgresCommentRepository;
    use super::role_repository::PostgresRoleRepository;
    use crate::application::seeder::run_seeders;
    use crate::data::comment_repository::CommentRepository;
    use crate::domain::actor::Actor;
    use crate::domain::comment::CommentDraft;
    use crate::domain::page::PageRequest;
    use crate::domain::post::PostDraft;
    use crate::domain::role::RoleName;
    use crate::domain::user::{LoginRequest, RegisterRequest};
    use crate::presentation::AppState;

    const SECRET: &str = "0123456789abcdef0123456789abcdef";

    async fn register_and_login(state: &AppState, username: &str) -> Actor {
        state
            .auth_service
            .register(RegisterRequest {
                name: username.to_string(),
                username: username.to_string(),
                email: format!("{username}@example.com"),
                password: "password123".to_string(),
            })
            .await
            .expect("register");
        let auth = state
            .auth_service
            .login(LoginRequest {
                username_or_email: format!("{}@EXAMPLE.com", username.to_uppercase()),
                password: "password123".to_string(),
            })
            .await
            .expect("login by email");
        Actor::new(auth.user.id, auth.user.username, auth.user.roles)
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL pointing at a running postgres"]
    async fn post_lifecycle_against_postgres(pool: PgPool) {
        run_seeders(
            &PostgresRoleRepository::new(pool.clone()),
            &PostgresCategoryRepository::new(pool.clone()),
        )
        .await
        .expect("seeders must run");
        let state = AppState::new(pool.clone(), SECRET, 3600);

        let alice = register_and_login(&state, "alice").await;
        assert_eq!(alice.roles, vec![RoleName::User]);
        let bob = register_and_login(&state, "bob").await;

        let post = state
            .post_service
            .create_post(
                &alice,
                PostDraft {
                    title: "Hello forum".to_string(),
                    description: "a description long enough".to_string(),
                    content: "first post".to_string(),
                    category_id: None,
                },
            )
            .await
            .expect("create post");
        assert_eq!(post.author.username, "alice");

        let page = state
            .post_service
            .get_all_posts(PageRequest::new(0, 10, "id", "asc").expect("page"))
            .await
            .expect("list posts");
        assert_eq!(page.total_elements, 1);
        assert_eq!(page.content[0].id, post.id);

        for text in ["one", "two"] {
            state
                .comment_service
                .create_comment(
                    &bob,
                    post.id,
                    CommentDraft {
                        body: text.to_string(),
                    },
                )
                .await
                .expect("create comment");
        }

        state
            .post_service
            .delete_post_by_id(&alice, post.id)
            .await
            .expect("owner delete");
        let left = PostgresCommentRepository::new(pool)
            .list_by_post(post.id)
            .await
            .expect("list comments");
        assert!(left.is_empty());
    }
}
