use super::error::DomainError;
use super::role::RoleName;

/// Authenticated caller of a service operation, taken from the bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Actor {
    pub(crate) user_id: i64,
    pub(crate) username: String,
    pub(crate) roles: Vec<RoleName>,
}

impl Actor {
    pub(crate) fn new(user_id: i64, username: impl Into<String>, roles: Vec<RoleName>) -> Self {
        Self {
            user_id,
            username: username.into(),
            roles,
        }
    }

    pub(crate) fn is_admin(&self) -> bool {
        self.roles.contains(&RoleName::Admin)
    }

    pub(crate) fn owns(&self, owner_id: i64) -> bool {
        self.user_id == owner_id
    }

    /// Owner-or-admin rule for mutating posts and comments.
    pub(crate) fn ensure_owner_or_admin(
        &self,
        owner_id: i64,
        message: &str,
    ) -> Result<(), DomainError> {
        if self.owns(owner_id) || self.is_admin() {
            return Ok(());
        }
        Err(DomainError::Forbidden(message.to_string()))
    }
}
