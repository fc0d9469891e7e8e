use async_trait::async_trait;
use sqlx::PgPool;

use super::{UNIQUE_VIOLATION, constraint_violation, unexpected};
use crate::data::role_repository::RoleRepository;
use crate::domain::error::DomainError;
use crate::domain::role::Role;

#[derive(Debug, Clone)]
pub(crate) struct PostgresRoleRepository {
    pool: PgPool,
}

impl PostgresRoleRepository {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct RoleRow {
    id: i64,
    name: String,
}

impl From<RoleRow> for Role {
    fn from(row: RoleRow) -> Self {
        Role {
            id: row.id,
            name: row.name,
        }
    }
}

#[async_trait]
impl RoleRepository for PostgresRoleRepository {
    async fn find_by_name(&self, name: &str) -> Result<Option<Role>, DomainError> {
        let row = sqlx::query_as::<_, RoleRow>(
            r#"
            SELECT id, name
            FROM roles
            WHERE name = $1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?;

        Ok(row.map(Role::from))
    }

    async fn create_role(&self, name: &str) -> Result<Role, DomainError> {
        let row = sqlx::query_as::<_, RoleRow>(
            r#"
            INSERT INTO roles (name)
            VALUES ($1)
            RETURNING id, name
            "#,
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await
        .map_err(|err| match constraint_violation(&err) {
            Some((code, _)) if code == UNIQUE_VIOLATION => {
                DomainError::AlreadyExists(format!("role {name}"))
            }
            _ => unexpected(err),
        })?;

        Ok(row.into())
    }
}
