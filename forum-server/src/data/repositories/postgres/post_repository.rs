use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use super::{FOREIGN_KEY_VIOLATION, UNIQUE_VIOLATION, constraint_violation, unexpected};
use crate::data::post_repository::{NewPost, PostFilter, PostPatch, PostRepository};
use crate::domain::error::DomainError;
use crate::domain::page::PageRequest;
use crate::domain::post::{Author, Post};

#[derive(Debug, Clone)]
pub(crate) struct PostgresPostRepository {
    pool: PgPool,
}

impl PostgresPostRepository {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct PostRow {
    id: i64,
    title: String,
    description: String,
    content: String,
    author_id: i64,
    author_username: String,
    author_name: String,
    category_id: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

const POST_COLUMNS: &str = r#"
    p.id,
    p.title,
    p.description,
    p.content,
    p.user_id AS author_id,
    u.username AS author_username,
    u.name AS author_name,
    p.category_id,
    p.created_at,
    p.updated_at
"#;

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn create_post(&self, input: NewPost) -> Result<Post, DomainError> {
        let sql = format!(
            r#"
            WITH p AS (
                INSERT INTO posts (title, description, content, user_id, category_id)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING *
            )
            SELECT {POST_COLUMNS}
            FROM p
            JOIN users u ON u.id = p.user_id
            "#
        );
        let row = sqlx::query_as::<_, PostRow>(&sql)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.content)
            .bind(input.author_id)
            .bind(input.category_id)
            .fetch_one(&self.pool)
            .await
            .map_err(map_post_db_error)?;

        map_row_to_post(row)
    }

    async fn get_post(&self, id: i64) -> Result<Option<Post>, DomainError> {
        let sql = format!(
            r#"
            SELECT {POST_COLUMNS}
            FROM posts p
            JOIN users u ON u.id = p.user_id
            WHERE p.id = $1
            "#
        );
        let row = sqlx::query_as::<_, PostRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_post_db_error)?;

        row.map(map_row_to_post).transpose()
    }

    async fn update_post(&self, id: i64, patch: PostPatch) -> Result<Option<Post>, DomainError> {
        let sql = format!(
            r#"
            WITH p AS (
                UPDATE posts
                SET title = $2,
                    description = $3,
                    content = $4,
                    category_id = $5,
                    updated_at = NOW()
                WHERE id = $1
                RETURNING *
            )
            SELECT {POST_COLUMNS}
            FROM p
            JOIN users u ON u.id = p.user_id
            "#
        );
        let row = sqlx::query_as::<_, PostRow>(&sql)
            .bind(id)
            .bind(&patch.title)
            .bind(&patch.description)
            .bind(&patch.content)
            .bind(patch.category_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_post_db_error)?;

        row.map(map_row_to_post).transpose()
    }

    async fn delete_post(&self, id: i64) -> Result<bool, DomainError> {
        // comments go with the post via ON DELETE CASCADE
        let result = sqlx::query(
            r#"
            DELETE FROM posts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(map_post_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_posts(
        &self,
        filter: &PostFilter,
        page: &PageRequest,
    ) -> Result<Vec<Post>, DomainError> {
        let column = page.sort.field.column();
        let direction = page.sort.direction.as_sql();
        let limit = i64::from(page.page_size);
        let offset = i64::try_from(page.offset()).unwrap_or(i64::MAX);

        let rows = match filter {
            PostFilter::All => {
                let sql = format!(
                    r#"
                    SELECT {POST_COLUMNS}
                    FROM posts p
                    JOIN users u ON u.id = p.user_id
                    ORDER BY p.{column} {direction}, p.id {direction}
                    LIMIT $1
                    OFFSET $2
                    "#
                );
                sqlx::query_as::<_, PostRow>(&sql)
                    .bind(limit)
                    .bind(offset)
                    .fetch_all(&self.pool)
                    .await
            }
            PostFilter::AuthorUsername(username) => {
                let sql = format!(
                    r#"
                    SELECT {POST_COLUMNS}
                    FROM posts p
                    JOIN users u ON u.id = p.user_id
                    WHERE u.username = $1
                    ORDER BY p.{column} {direction}, p.id {direction}
                    LIMIT $2
                    OFFSET $3
                    "#
                );
                sqlx::query_as::<_, PostRow>(&sql)
                    .bind(username)
                    .bind(limit)
                    .bind(offset)
                    .fetch_all(&self.pool)
                    .await
            }
        }
        .map_err(map_post_db_error)?;

        rows.into_iter().map(map_row_to_post).collect()
    }

    async fn count_posts(&self, filter: &PostFilter) -> Result<u64, DomainError> {
        let (count,): (i64,) = match filter {
            PostFilter::All => {
                sqlx::query_as("SELECT COUNT(*) FROM posts")
                    .fetch_one(&self.pool)
                    .await
            }
            PostFilter::AuthorUsername(username) => {
                sqlx::query_as(
                    r#"
                    SELECT COUNT(*)
                    FROM posts p
                    JOIN users u ON u.id = p.user_id
                    WHERE u.username = $1
                    "#,
                )
                .bind(username)
                .fetch_one(&self.pool)
                .await
            }
        }
        .map_err(map_post_db_error)?;

        Ok(u64::try_from(count).unwrap_or(0))
    }

    async fn list_posts_by_category(&self, category_id: i64) -> Result<Vec<Post>, DomainError> {
        let sql = format!(
            r#"
            SELECT {POST_COLUMNS}
            FROM posts p
            JOIN users u ON u.id = p.user_id
            WHERE p.category_id = $1
            ORDER BY p.id
            "#
        );
        let rows = sqlx::query_as::<_, PostRow>(&sql)
            .bind(category_id)
            .fetch_all(&self.pool)
            .await
            .map_err(map_post_db_error)?;

        rows.into_iter().map(map_row_to_post).collect()
    }
}

fn map_row_to_post(row: PostRow) -> Result<Post, DomainError> {
    let author = Author {
        id: row.author_id,
        username: row.author_username,
        name: row.author_name,
    };
    Post::new(
        row.id,
        row.title,
        row.description,
        row.content,
        author,
        row.category_id,
        row.created_at,
        row.updated_at,
    )
    .map_err(|err| DomainError::Unexpected(err.to_string()))
}

fn map_post_db_error(err: sqlx::Error) -> DomainError {
    match constraint_violation(&err) {
        Some((code, _)) if code == UNIQUE_VIOLATION => {
            DomainError::AlreadyExists("post title".to_string())
        }
        Some((code, constraint)) if code == FOREIGN_KEY_VIOLATION => {
            let resource = match constraint.as_deref() {
                Some("posts_category_id_fkey") => "category",
                _ => "author",
            };
            DomainError::NotFound(resource.to_string())
        }
        _ => unexpected(err),
    }
}
