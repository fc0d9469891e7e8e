use async_trait::async_trait;

use crate::domain::error::DomainError;
use crate::domain::page::PageRequest;
use crate::domain::post::Post;

#[derive(Debug, Clone)]
pub(crate) struct NewPost {
    pub(crate) title: String,
    pub(crate) description: String,
    pub(crate) content: String,
    pub(crate) author_id: i64,
    pub(crate) category_id: i64,
}

#[derive(Debug, Clone)]
pub(crate) struct PostPatch {
    pub(crate) title: String,
    pub(crate) description: String,
    pub(crate) content: String,
    pub(crate) category_id: i64,
}

/// Which posts a paginated listing covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PostFilter {
    All,
    AuthorUsername(String),
}

#[async_trait]
pub(crate) trait PostRepository: Send + Sync {
    async fn create_post(&self, input: NewPost) -> Result<Post, DomainError>;
    async fn get_post(&self, id: i64) -> Result<Option<Post>, DomainError>;
    async fn update_post(&self, id: i64, patch: PostPatch) -> Result<Option<Post>, DomainError>;
    /// Removes the post together with its comments.
    async fn delete_post(&self, id: i64) -> Result<bool, DomainError>;
    async fn list_posts(
        &self,
        filter: &PostFilter,
        page: &PageRequest,
    ) -> Result<Vec<Post>, DomainError>;
    async fn count_posts(&self, filter: &PostFilter) -> Result<u64, DomainError>;
    async fn list_posts_by_category(&self, category_id: i64) -> Result<Vec<Post>, DomainError>;
}
