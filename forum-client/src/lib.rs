//! Клиентская библиотека для REST API `forum-server`.
//!
//! `ForumClient` покрывает аутентификацию, посты, комментарии, категории и
//! профиль текущего пользователя. После `login` клиент хранит JWT-токен и
//! автоматически подставляет его в защищённые запросы.
#![warn(missing_docs)]

mod error;
mod http_client;
mod models;

pub use error::{ForumClientError, ForumClientResult};
pub use models::{
    AuthResponse, Category, Comment, PageParams, Post, PostInput, PostPage, RegisterInput, User,
};

use http_client::HttpClient;
use reqwest::Method;
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LoginRequestDto<'a> {
    username_or_email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct CommentRequestDto<'a> {
    body: &'a str,
}

#[derive(Debug, Clone)]
/// Клиент форума с сохранением JWT-токена между вызовами.
pub struct ForumClient {
    http: HttpClient,
    token: Option<String>,
}

impl ForumClient {
    /// Создаёт клиент для сервера с базовым URL, например `http://127.0.0.1:8080`.
    pub fn new(base_url: impl Into<String>) -> ForumClientResult<Self> {
        Ok(Self {
            http: HttpClient::new(base_url)?,
            token: None,
        })
    }

    /// Устанавливает JWT-токен вручную.
    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    /// Возвращает текущий JWT-токен, если он установлен.
    pub fn get_token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Очищает сохранённый JWT-токен.
    pub fn clear_token(&mut self) {
        self.token = None;
    }

    /// Регистрирует пользователя и возвращает текстовое подтверждение сервера.
    ///
    /// Токен не выдаётся: после регистрации нужно вызвать `login`.
    pub async fn register(&self, input: &RegisterInput) -> ForumClientResult<String> {
        self.http
            .send_for_text(Method::POST, "/api/auth/register", Some(input), None)
            .await
    }

    /// Выполняет вход по логину или email и сохраняет полученный JWT-токен.
    pub async fn login(
        &mut self,
        username_or_email: &str,
        password: &str,
    ) -> ForumClientResult<AuthResponse> {
        let payload = LoginRequestDto {
            username_or_email,
            password,
        };
        let response: AuthResponse = self
            .http
            .send_json(Method::POST, "/api/auth/login", &payload, None)
            .await?;

        self.token = Some(response.access_token.clone());
        Ok(response)
    }

    /// Возвращает профиль текущего пользователя. Требует токен.
    pub async fn me(&self) -> ForumClientResult<User> {
        let token = self.require_token()?;
        self.http
            .get_json::<(), _>("/api/users/me", None, Some(token))
            .await
    }

    /// Возвращает посты текущего пользователя. Требует токен.
    pub async fn my_posts(&self, params: &PageParams) -> ForumClientResult<PostPage> {
        let token = self.require_token()?;
        self.http
            .get_json("/api/users/me/posts", Some(params), Some(token))
            .await
    }

    /// Возвращает страницу постов.
    pub async fn list_posts(&self, params: &PageParams) -> ForumClientResult<PostPage> {
        self.http.get_json("/api/posts", Some(params), None).await
    }

    /// Возвращает все посты категории без пагинации.
    pub async fn posts_by_category(&self, category_id: i64) -> ForumClientResult<Vec<Post>> {
        self.http
            .get_json::<(), _>(&format!("/api/posts/category/{category_id}"), None, None)
            .await
    }

    /// Возвращает пост по идентификатору.
    pub async fn get_post(&self, id: i64) -> ForumClientResult<Post> {
        self.http
            .get_json::<(), _>(&format!("/api/posts/{id}"), None, None)
            .await
    }

    /// Создаёт пост. Требует токен.
    pub async fn create_post(&self, input: &PostInput) -> ForumClientResult<Post> {
        let token = self.require_token()?;
        self.http
            .send_json(Method::POST, "/api/posts", input, Some(token))
            .await
    }

    /// Обновляет пост. Требует токен автора или администратора.
    pub async fn update_post(&self, id: i64, input: &PostInput) -> ForumClientResult<Post> {
        let token = self.require_token()?;
        self.http
            .send_json(Method::PUT, &format!("/api/posts/{id}"), input, Some(token))
            .await
    }

    /// Удаляет пост вместе с комментариями. Требует токен автора или администратора.
    pub async fn delete_post(&self, id: i64) -> ForumClientResult<String> {
        let token = self.require_token()?;
        self.http
            .send_for_text::<()>(Method::DELETE, &format!("/api/posts/{id}"), None, Some(token))
            .await
    }

    /// Возвращает список предустановленных категорий.
    pub async fn categories(&self) -> ForumClientResult<Vec<Category>> {
        self.http
            .get_json::<(), _>("/api/v1/categories", None, None)
            .await
    }

    /// Возвращает комментарии поста.
    pub async fn comments(&self, post_id: i64) -> ForumClientResult<Vec<Comment>> {
        self.http
            .get_json::<(), _>(&format!("/api/posts/{post_id}/comments"), None, None)
            .await
    }

    /// Добавляет комментарий к посту. Требует токен.
    pub async fn add_comment(&self, post_id: i64, body: &str) -> ForumClientResult<Comment> {
        let token = self.require_token()?;
        self.http
            .send_json(
                Method::POST,
                &format!("/api/posts/{post_id}/comments"),
                &CommentRequestDto { body },
                Some(token),
            )
            .await
    }

    /// Изменяет комментарий. Требует токен автора или администратора.
    pub async fn update_comment(
        &self,
        post_id: i64,
        comment_id: i64,
        body: &str,
    ) -> ForumClientResult<Comment> {
        let token = self.require_token()?;
        self.http
            .send_json(
                Method::PUT,
                &format!("/api/posts/{post_id}/comments/{comment_id}"),
                &CommentRequestDto { body },
                Some(token),
            )
            .await
    }

    /// Удаляет комментарий. Требует токен автора или администратора.
    pub async fn delete_comment(&self, post_id: i64, comment_id: i64) -> ForumClientResult<String> {
        let token = self.require_token()?;
        self.http
            .send_for_text::<()>(
                Method::DELETE,
                &format!("/api/posts/{post_id}/comments/{comment_id}"),
                None,
                Some(token),
            )
            .await
    }

    fn require_token(&self) -> ForumClientResult<&str> {
        self.token.as_deref().ok_or(ForumClientError::Unauthorized)
    }
}
