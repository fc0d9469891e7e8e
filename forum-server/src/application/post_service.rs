use tracing::{info, warn};

use crate::data::category_repository::CategoryRepository;
use crate::data::post_repository::{NewPost, PostFilter, PostPatch, PostRepository};
use crate::data::user_repository::UserRepository;
use crate::domain::actor::Actor;
use crate::domain::category::{Category, CategoryPreset, DEFAULT_CATEGORY_NAME};
use crate::domain::error::DomainError;
use crate::domain::page::{Page, PageRequest};
use crate::domain::post::{Post, PostDraft};

const NOT_OWNER_MESSAGE: &str = "You can only modify your own posts.";

pub(crate) struct PostService<P, C, U>
where
    P: PostRepository,
    C: CategoryRepository,
    U: UserRepository,
{
    posts: P,
    categories: C,
    users: U,
}

impl<P, C, U> PostService<P, C, U>
where
    P: PostRepository,
    C: CategoryRepository,
    U: UserRepository,
{
    pub(crate) fn new(posts: P, categories: C, users: U) -> Self {
        Self {
            posts,
            categories,
            users,
        }
    }

    pub(crate) async fn create_post(
        &self,
        actor: &Actor,
        draft: PostDraft,
    ) -> Result<Post, DomainError> {
        let draft = draft.validate()?;

        let user = self
            .users
            .find_by_username(&actor.username)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("user username: {}", actor.username)))?;
        let category = self.resolve_category(draft.category_id).await?;

        let new_post = NewPost {
            title: draft.title,
            description: draft.description,
            content: draft.content,
            author_id: user.id,
            category_id: category.id,
        };
        let post = self.posts.create_post(new_post).await?;
        info!(post_id = post.id, author_id = user.id, "post created");
        Ok(post)
    }

    pub(crate) async fn get_all_posts(&self, page: PageRequest) -> Result<Page<Post>, DomainError> {
        self.page_of(PostFilter::All, page).await
    }

    pub(crate) async fn get_post_by_id(&self, id: i64) -> Result<Post, DomainError> {
        self.find_post(id).await
    }

    pub(crate) async fn update_post(
        &self,
        actor: &Actor,
        id: i64,
        draft: PostDraft,
    ) -> Result<Post, DomainError> {
        let draft = draft.validate()?;
        let post = self.find_post(id).await?;
        self.ensure_can_modify(actor, &post)?;

        let category = self.resolve_category(draft.category_id).await?;
        let patch = PostPatch {
            title: draft.title,
            description: draft.description,
            content: draft.content,
            category_id: category.id,
        };
        self.posts
            .update_post(id, patch)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("post id: {id}")))
    }

    pub(crate) async fn delete_post_by_id(&self, actor: &Actor, id: i64) -> Result<(), DomainError> {
        let post = self.find_post(id).await?;
        self.ensure_can_modify(actor, &post)?;

        let deleted = self.posts.delete_post(id).await?;
        if !deleted {
            return Err(DomainError::NotFound(format!("post id: {id}")));
        }
        info!(post_id = id, actor_id = actor.user_id, "post deleted");
        Ok(())
    }

    pub(crate) async fn get_posts_by_category(
        &self,
        category_id: i64,
    ) -> Result<Vec<Post>, DomainError> {
        self.posts.list_posts_by_category(category_id).await
    }

    pub(crate) async fn get_my_posts(
        &self,
        username: &str,
        page: PageRequest,
    ) -> Result<Page<Post>, DomainError> {
        self.page_of(PostFilter::AuthorUsername(username.to_string()), page)
            .await
    }

    async fn page_of(&self, filter: PostFilter, page: PageRequest) -> Result<Page<Post>, DomainError> {
        let content = self.posts.list_posts(&filter, &page).await?;
        let total = self.posts.count_posts(&filter).await?;
        Ok(Page::new(content, &page, total))
    }

    async fn find_post(&self, id: i64) -> Result<Post, DomainError> {
        self.posts
            .get_post(id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("post id: {id}")))
    }

    fn ensure_can_modify(&self, actor: &Actor, post: &Post) -> Result<(), DomainError> {
        actor
            .ensure_owner_or_admin(post.author.id, NOT_OWNER_MESSAGE)
            .inspect_err(|_| {
                warn!(post_id = post.id, actor_id = actor.user_id, "post mutation forbidden");
            })
    }

    /// Explicit id must exist; no id means the seeded default category.
    async fn resolve_category(&self, category_id: Option<i64>) -> Result<Category, DomainError> {
        let category = match category_id {
            Some(id) => self
                .categories
                .find_by_id(id)
                .await?
                .ok_or_else(|| DomainError::NotFound(format!("category id: {id}")))?,
            None => self
                .categories
                .find_by_name(DEFAULT_CATEGORY_NAME)
                .await?
                .ok_or_else(|| {
                    DomainError::Configuration(format!(
                        "Default category '{DEFAULT_CATEGORY_NAME}' is missing. Please restart the server to seed it."
                    ))
                })?,
        };

        // unreachable with seeded data; guards against rows edited behind the schema's back
        if !CategoryPreset::is_preset_name(&category.name) {
            return Err(DomainError::BadRequest(
                "Invalid category. Please choose one of the preset categories.".to_string(),
            ));
        }
        Ok(category)
    }
}
