use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use super::{FOREIGN_KEY_VIOLATION, constraint_violation, unexpected};
use crate::data::comment_repository::{CommentRepository, NewComment};
use crate::domain::comment::Comment;
use crate::domain::error::DomainError;
use crate::domain::post::Author;

#[derive(Debug, Clone)]
pub(crate) struct PostgresCommentRepository {
    pool: PgPool,
}

impl PostgresCommentRepository {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct CommentRow {
    id: i64,
    body: String,
    post_id: i64,
    author_id: i64,
    author_username: String,
    author_name: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

const COMMENT_COLUMNS: &str = r#"
    c.id,
    c.body,
    c.post_id,
    c.user_id AS author_id,
    u.username AS author_username,
    u.name AS author_name,
    c.created_at,
    c.updated_at
"#;

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn create_comment(&self, input: NewComment) -> Result<Comment, DomainError> {
        let sql = format!(
            r#"
            WITH c AS (
                INSERT INTO comments (body, post_id, user_id)
                VALUES ($1, $2, $3)
                RETURNING *
            )
            SELECT {COMMENT_COLUMNS}
            FROM c
            JOIN users u ON u.id = c.user_id
            "#
        );
        let row = sqlx::query_as::<_, CommentRow>(&sql)
            .bind(&input.body)
            .bind(input.post_id)
            .bind(input.author_id)
            .fetch_one(&self.pool)
            .await
            .map_err(map_comment_db_error)?;

        map_row_to_comment(row)
    }

    async fn get_comment(&self, id: i64) -> Result<Option<Comment>, DomainError> {
        let sql = format!(
            r#"
            SELECT {COMMENT_COLUMNS}
            FROM comments c
            JOIN users u ON u.id = c.user_id
            WHERE c.id = $1
            "#
        );
        let row = sqlx::query_as::<_, CommentRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_comment_db_error)?;

        row.map(map_row_to_comment).transpose()
    }

    async fn list_by_post(&self, post_id: i64) -> Result<Vec<Comment>, DomainError> {
        let sql = format!(
            r#"
            SELECT {COMMENT_COLUMNS}
            FROM comments c
            JOIN users u ON u.id = c.user_id
            WHERE c.post_id = $1
            ORDER BY c.created_at, c.id
            "#
        );
        let rows = sqlx::query_as::<_, CommentRow>(&sql)
            .bind(post_id)
            .fetch_all(&self.pool)
            .await
            .map_err(map_comment_db_error)?;

        rows.into_iter().map(map_row_to_comment).collect()
    }

    async fn update_comment(&self, id: i64, body: String) -> Result<Option<Comment>, DomainError> {
        let sql = format!(
            r#"
            WITH c AS (
                UPDATE comments
                SET body = $2,
                    updated_at = NOW()
                WHERE id = $1
                RETURNING *
            )
            SELECT {COMMENT_COLUMNS}
            FROM c
            JOIN users u ON u.id = c.user_id
            "#
        );
        let row = sqlx::query_as::<_, CommentRow>(&sql)
            .bind(id)
            .bind(&body)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_comment_db_error)?;

        row.map(map_row_to_comment).transpose()
    }

    async fn delete_comment(&self, id: i64) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            DELETE FROM comments
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(map_comment_db_error)?;

        Ok(result.rows_affected() > 0)
    }
}

fn map_row_to_comment(row: CommentRow) -> Result<Comment, DomainError> {
    let author = Author {
        id: row.author_id,
        username: row.author_username,
        name: row.author_name,
    };
    Comment::new(
        row.id,
        row.body,
        row.post_id,
        author,
        row.created_at,
        row.updated_at,
    )
    .map_err(|err| DomainError::Unexpected(err.to_string()))
}

fn map_comment_db_error(err: sqlx::Error) -> DomainError {
    match constraint_violation(&err) {
        Some((code, constraint)) if code == FOREIGN_KEY_VIOLATION => {
            let resource = match constraint.as_deref() {
                Some("comments_post_id_fkey") => "post",
                _ => "author",
            };
            DomainError::NotFound(resource.to_string())
        }
        _ => unexpected(err),
    }
}
