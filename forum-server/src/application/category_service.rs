use tracing::warn;

use crate::data::category_repository::CategoryRepository;
use crate::domain::actor::Actor;
use crate::domain::category::Category;
use crate::domain::error::DomainError;

/// Read access to the preset categories. Mutations are always refused.
pub(crate) struct CategoryService<C: CategoryRepository> {
    categories: C,
}

impl<C: CategoryRepository> CategoryService<C> {
    pub(crate) fn new(categories: C) -> Self {
        Self { categories }
    }

    pub(crate) async fn get_category(&self, id: i64) -> Result<Category, DomainError> {
        self.categories
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("category id: {id}")))
    }

    pub(crate) async fn get_all_categories(&self) -> Result<Vec<Category>, DomainError> {
        self.categories.list_categories().await
    }

    pub(crate) fn add_category(&self, actor: &Actor) -> Result<Category, DomainError> {
        Err(refused(actor, "created"))
    }

    pub(crate) fn update_category(&self, actor: &Actor, _id: i64) -> Result<Category, DomainError> {
        Err(refused(actor, "updated"))
    }

    pub(crate) fn delete_category(&self, actor: &Actor, _id: i64) -> Result<(), DomainError> {
        Err(refused(actor, "deleted"))
    }
}

fn refused(actor: &Actor, verb: &str) -> DomainError {
    warn!(actor_id = actor.user_id, verb, "category mutation refused");
    DomainError::Forbidden(format!("Categories are preset and cannot be {verb}."))
}

#[cfg(test)]
mod tests {
    use super::CategoryService;
    use crate::application::seeder::seed_categories;
    use crate::data::repositories::memory::InMemoryStore;
    use crate::domain::actor::Actor;
    use crate::domain::category::{CategoryPreset, DEFAULT_CATEGORY_NAME};
    use crate::domain::error::DomainError;
    use crate::domain::role::RoleName;

    async fn seeded() -> CategoryService<InMemoryStore> {
        let store = InMemoryStore::new();
        seed_categories(&store).await.expect("categories must seed");
        CategoryService::new(store)
    }

    #[tokio::test]
    async fn lists_all_presets() {
        let service = seeded().await;
        let categories = service.get_all_categories().await.expect("list must succeed");

        assert_eq!(categories.len(), CategoryPreset::ALL.len());
        assert!(categories.iter().any(|c| c.name == DEFAULT_CATEGORY_NAME));
    }

    #[tokio::test]
    async fn get_category_by_id_and_missing_id() {
        let service = seeded().await;
        let categories = service.get_all_categories().await.expect("list must succeed");
        let first = &categories[0];

        let found = service.get_category(first.id).await.expect("must exist");
        assert_eq!(&found, first);

        let err = service.get_category(9_999).await.expect_err("must fail");
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[tokio::test]
    async fn mutations_are_forbidden_even_for_admins() {
        let service = seeded().await;
        let admin = Actor::new(1, "root", vec![RoleName::User, RoleName::Admin]);

        let err = service.add_category(&admin).expect_err("must fail");
        assert!(matches!(err, DomainError::Forbidden(ref msg) if msg == "Categories are preset and cannot be created."));
        let err = service.update_category(&admin, 1).expect_err("must fail");
        assert!(matches!(err, DomainError::Forbidden(ref msg) if msg.ends_with("updated.")));
        let err = service.delete_category(&admin, 1).expect_err("must fail");
        assert!(matches!(err, DomainError::Forbidden(ref msg) if msg.ends_with("deleted.")));

        let categories = service.get_all_categories().await.expect("list must succeed");
        assert_eq!(categories.len(), CategoryPreset::ALL.len());
    }
}
