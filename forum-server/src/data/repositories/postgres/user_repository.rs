use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use super::{UNIQUE_VIOLATION, constraint_violation, unexpected};
use crate::data::user_repository::{NewUser, UserCredentials, UserRepository};
use crate::domain::error::DomainError;
use crate::domain::role::RoleName;
use crate::domain::user::User;

#[derive(Debug, Clone)]
pub(crate) struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    name: String,
    username: String,
    email: String,
    password_hash: String,
    roles: Vec<String>,
    created_at: DateTime<Utc>,
}

const SELECT_USER: &str = r#"
    SELECT
        u.id,
        u.name,
        u.username,
        u.email,
        u.password_hash,
        COALESCE(
            array_agg(r.name::TEXT ORDER BY r.name) FILTER (WHERE r.name IS NOT NULL),
            '{}'::TEXT[]
        ) AS roles,
        u.created_at
    FROM users u
    LEFT JOIN users_roles ur ON ur.user_id = u.id
    LEFT JOIN roles r ON r.id = ur.role_id
"#;

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create_user(&self, input: NewUser) -> Result<User, DomainError> {
        let mut tx = self.pool.begin().await.map_err(unexpected)?;

        let (user_id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO users (name, username, email, password_hash)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(&input.name)
        .bind(&input.username)
        .bind(&input.email)
        .bind(&input.password_hash)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_user_db_error)?;

        for role_id in &input.role_ids {
            sqlx::query(
                r#"
                INSERT INTO users_roles (user_id, role_id)
                VALUES ($1, $2)
                "#,
            )
            .bind(user_id)
            .bind(role_id)
            .execute(&mut *tx)
            .await
            .map_err(map_user_db_error)?;
        }

        let sql = format!("{SELECT_USER} WHERE u.id = $1 GROUP BY u.id");
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(user_id)
            .fetch_one(&mut *tx)
            .await
            .map_err(map_user_db_error)?;

        tx.commit().await.map_err(unexpected)?;

        map_row_to_credentials(row).map(|creds| creds.user)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        let sql = format!("{SELECT_USER} WHERE u.username = $1 GROUP BY u.id");
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_user_db_error)?;

        row.map(|r| map_row_to_credentials(r).map(|creds| creds.user))
            .transpose()
    }

    async fn find_by_username_or_email(
        &self,
        username_or_email: &str,
    ) -> Result<Option<UserCredentials>, DomainError> {
        let sql = format!(
            "{SELECT_USER} WHERE u.username = $1 OR u.email = LOWER($1) GROUP BY u.id ORDER BY u.id LIMIT 1"
        );
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(username_or_email)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_user_db_error)?;

        row.map(map_row_to_credentials).transpose()
    }

    async fn exists_by_username(&self, username: &str) -> Result<bool, DomainError> {
        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS (SELECT 1 FROM users WHERE username = $1)")
                .bind(username)
                .fetch_one(&self.pool)
                .await
                .map_err(unexpected)?;
        Ok(exists)
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS (SELECT 1 FROM users WHERE email = $1)")
                .bind(email)
                .fetch_one(&self.pool)
                .await
                .map_err(unexpected)?;
        Ok(exists)
    }
}

fn map_row_to_credentials(row: UserRow) -> Result<UserCredentials, DomainError> {
    let roles = row
        .roles
        .iter()
        .filter_map(|name| RoleName::parse(name))
        .collect();
    let user = User::new(
        row.id,
        row.name,
        row.username,
        row.email,
        roles,
        row.created_at,
    )
    .map_err(|err| DomainError::Unexpected(err.to_string()))?;

    Ok(UserCredentials {
        user,
        password_hash: row.password_hash,
    })
}

fn map_user_db_error(err: sqlx::Error) -> DomainError {
    if let Some((code, constraint)) = constraint_violation(&err)
        && code == UNIQUE_VIOLATION
    {
        let resource = match constraint.as_deref() {
            Some("users_username_key") => "username",
            Some("users_email_key") => "email",
            _ => "user",
        };
        return DomainError::AlreadyExists(resource.to_string());
    }
    unexpected(err)
}
