use tracing::info;

use crate::data::category_repository::{CategoryRepository, NewCategory};
use crate::data::role_repository::RoleRepository;
use crate::domain::category::CategoryPreset;
use crate::domain::error::DomainError;
use crate::domain::role::RoleName;

/// Ensures every role exists. Safe to run on every start.
pub(crate) async fn seed_roles<R: RoleRepository>(roles: &R) -> Result<(), DomainError> {
    for role in RoleName::ALL {
        if roles.find_by_name(role.as_str()).await?.is_some() {
            continue;
        }
        match roles.create_role(role.as_str()).await {
            Ok(created) => info!(role = %created.name, id = created.id, "seeded role"),
            // another instance won the race
            Err(DomainError::AlreadyExists(_)) => {}
            Err(err) => return Err(err),
        }
    }
    Ok(())
}

/// Ensures every preset category exists. Safe to run on every start.
pub(crate) async fn seed_categories<C: CategoryRepository>(
    categories: &C,
) -> Result<(), DomainError> {
    for preset in CategoryPreset::ALL {
        if categories.find_by_name(preset.name()).await?.is_some() {
            continue;
        }
        let input = NewCategory {
            name: preset.name().to_string(),
            description: preset.description().to_string(),
        };
        match categories.create_category(input).await {
            Ok(created) => info!(category = %created.name, id = created.id, "seeded category"),
            Err(DomainError::AlreadyExists(_)) => {}
            Err(err) => return Err(err),
        }
    }
    Ok(())
}

pub(crate) async fn run_seeders<R, C>(roles: &R, categories: &C) -> Result<(), DomainError>
where
    R: RoleRepository,
    C: CategoryRepository,
{
    seed_roles(roles).await?;
    seed_categories(categories).await?;
    Ok(())
}
