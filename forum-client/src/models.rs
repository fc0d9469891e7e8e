use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Профиль текущего пользователя (`/api/users/me`).
pub struct User {
    /// Идентификатор пользователя.
    pub id: i64,
    /// Логин.
    pub username: String,
    /// Отображаемое имя.
    pub name: String,
    /// Email.
    pub email: String,
    /// Роли пользователя, например `ROLE_USER`.
    #[serde(default)]
    pub roles: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Ответ после успешного входа.
pub struct AuthResponse {
    /// JWT access token.
    pub access_token: String,
    /// Тип токена, всегда `Bearer`.
    pub token_type: String,
    /// Идентификатор пользователя.
    pub user_id: i64,
    /// Логин.
    pub username: String,
    /// Отображаемое имя.
    pub name: String,
    /// Email.
    pub email: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
/// Данные для регистрации.
pub struct RegisterInput {
    /// Отображаемое имя.
    pub name: String,
    /// Логин (3..64 символа).
    pub username: String,
    /// Email.
    pub email: String,
    /// Пароль (8..128 символов).
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Пост вместе с данными автора.
pub struct Post {
    /// Идентификатор поста.
    pub id: i64,
    /// Заголовок поста.
    pub title: String,
    /// Краткое описание.
    pub description: String,
    /// Содержимое поста.
    pub content: String,
    /// Дата и время создания поста (UTC).
    pub created_at: DateTime<Utc>,
    /// Дата и время последнего обновления поста (UTC).
    pub updated_at: DateTime<Utc>,
    /// Идентификатор автора.
    pub author_id: i64,
    /// Логин автора.
    pub author_username: String,
    /// Имя автора.
    pub author_name: String,
    /// Идентификатор категории.
    pub category_id: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
/// Данные для создания или обновления поста.
pub struct PostInput {
    /// Заголовок (не короче 2 символов).
    pub title: String,
    /// Описание (не короче 10 символов).
    pub description: String,
    /// Содержимое.
    pub content: String,
    /// Категория; без неё сервер использует `General`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Страница постов с метаданными пагинации.
pub struct PostPage {
    /// Посты на текущей странице.
    pub content: Vec<Post>,
    /// Номер страницы, начиная с 0.
    pub page_no: u32,
    /// Размер страницы.
    pub page_size: u32,
    /// Общее количество постов.
    pub total_elements: u64,
    /// Общее количество страниц.
    pub total_pages: u32,
    /// Признак последней страницы.
    pub last: bool,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
/// Параметры пагинации и сортировки; пустые поля заменяются серверными значениями по умолчанию.
pub struct PageParams {
    /// Номер страницы, начиная с 0.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_no: Option<u32>,
    /// Размер страницы (1..=100).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    /// Поле сортировки: `id`, `title`, `createdAt`, `updatedAt`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
    /// `asc` или `desc`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_dir: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Комментарий к посту.
pub struct Comment {
    /// Идентификатор комментария.
    pub id: i64,
    /// Текст комментария.
    pub body: String,
    /// Идентификатор поста.
    pub post_id: i64,
    /// Дата и время создания (UTC).
    pub created_at: DateTime<Utc>,
    /// Дата и время последнего обновления (UTC).
    pub updated_at: DateTime<Utc>,
    /// Идентификатор автора.
    pub author_id: i64,
    /// Логин автора.
    pub author_username: String,
    /// Имя автора.
    pub author_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Одна из предустановленных категорий.
pub struct Category {
    /// Идентификатор категории.
    pub id: i64,
    /// Название категории.
    pub name: String,
    /// Описание категории.
    pub description: String,
}
