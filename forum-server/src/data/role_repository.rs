use async_trait::async_trait;

use crate::domain::error::DomainError;
use crate::domain::role::Role;

#[async_trait]
pub(crate) trait RoleRepository: Send + Sync {
    async fn find_by_name(&self, name: &str) -> Result<Option<Role>, DomainError>;
    async fn create_role(&self, name: &str) -> Result<Role, DomainError>;
}
