//! In-memory store backing service tests. Mirrors the schema's unique
//! constraints, foreign keys and the comment cascade on post deletion.

use std::cmp::Ordering;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::data::category_repository::{CategoryRepository, NewCategory};
use crate::data::comment_repository::{CommentRepository, NewComment};
use crate::data::post_repository::{NewPost, PostFilter, PostPatch, PostRepository};
use crate::data::role_repository::RoleRepository;
use crate::data::user_repository::{NewUser, UserCredentials, UserRepository};
use crate::domain::category::Category;
use crate::domain::comment::Comment;
use crate::domain::error::DomainError;
use crate::domain::page::{PageRequest, PostSortField, SortDirection};
use crate::domain::post::{Author, Post};
use crate::domain::role::{Role, RoleName};
use crate::domain::user::User;

#[derive(Debug, Clone)]
struct StoredUser {
    id: i64,
    name: String,
    username: String,
    email: String,
    password_hash: String,
    role_ids: Vec<i64>,
    created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
struct StoredPost {
    id: i64,
    title: String,
    description: String,
    content: String,
    user_id: i64,
    category_id: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
struct StoredComment {
    id: i64,
    body: String,
    post_id: i64,
    user_id: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct State {
    last_id: i64,
    roles: Vec<Role>,
    users: Vec<StoredUser>,
    categories: Vec<Category>,
    posts: Vec<StoredPost>,
    comments: Vec<StoredComment>,
}

impl State {
    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }

    fn user(&self, id: i64) -> Option<&StoredUser> {
        self.users.iter().find(|user| user.id == id)
    }

    fn to_user(&self, stored: &StoredUser) -> User {
        let roles = stored
            .role_ids
            .iter()
            .filter_map(|role_id| self.roles.iter().find(|role| role.id == *role_id))
            .filter_map(|role| RoleName::parse(&role.name))
            .collect();
        User {
            id: stored.id,
            name: stored.name.clone(),
            username: stored.username.clone(),
            email: stored.email.clone(),
            roles,
            created_at: stored.created_at,
        }
    }

    fn author(&self, user_id: i64) -> Result<Author, DomainError> {
        let user = self
            .user(user_id)
            .ok_or_else(|| DomainError::NotFound("author".to_string()))?;
        Ok(Author {
            id: user.id,
            username: user.username.clone(),
            name: user.name.clone(),
        })
    }

    fn to_post(&self, stored: &StoredPost) -> Result<Post, DomainError> {
        Post::new(
            stored.id,
            stored.title.clone(),
            stored.description.clone(),
            stored.content.clone(),
            self.author(stored.user_id)?,
            stored.category_id,
            stored.created_at,
            stored.updated_at,
        )
    }

    fn to_comment(&self, stored: &StoredComment) -> Result<Comment, DomainError> {
        Comment::new(
            stored.id,
            stored.body.clone(),
            stored.post_id,
            self.author(stored.user_id)?,
            stored.created_at,
            stored.updated_at,
        )
    }

    fn check_post_refs(&self, user_id: i64, category_id: i64) -> Result<(), DomainError> {
        if self.user(user_id).is_none() {
            return Err(DomainError::NotFound("author".to_string()));
        }
        if !self.categories.iter().any(|c| c.id == category_id) {
            return Err(DomainError::NotFound("category".to_string()));
        }
        Ok(())
    }

    fn title_taken(&self, title: &str, except_id: Option<i64>) -> bool {
        self.posts
            .iter()
            .any(|post| post.title == title && Some(post.id) != except_id)
    }

    fn matches(&self, post: &StoredPost, filter: &PostFilter) -> bool {
        match filter {
            PostFilter::All => true,
            PostFilter::AuthorUsername(username) => self
                .user(post.user_id)
                .is_some_and(|user| &user.username == username),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct InMemoryStore {
    state: Arc<Mutex<State>>,
}

impl InMemoryStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().expect("in-memory store mutex poisoned")
    }

    /// Inserts a user directly, creating any missing role rows on the way.
    pub(crate) fn insert_user(&self, username: &str, roles: &[RoleName]) -> User {
        let mut state = self.lock();
        let mut role_ids = Vec::new();
        for role in roles {
            let existing = state.roles.iter().find(|r| r.name == role.as_str()).cloned();
            let role = match existing {
                Some(role) => role,
                None => {
                    let role = Role {
                        id: state.next_id(),
                        name: role.as_str().to_string(),
                    };
                    state.roles.push(role.clone());
                    role
                }
            };
            role_ids.push(role.id);
        }
        let stored = StoredUser {
            id: state.next_id(),
            name: format!("{username} name"),
            username: username.to_string(),
            email: format!("{username}@example.com"),
            password_hash: String::new(),
            role_ids,
            created_at: Utc::now(),
        };
        state.users.push(stored.clone());
        state.to_user(&stored)
    }

    /// Inserts a category row without the preset check the schema enforces.
    pub(crate) fn insert_raw_category(&self, name: &str) -> Category {
        let mut state = self.lock();
        let category = Category {
            id: state.next_id(),
            name: name.to_string(),
            description: format!("{name} description"),
        };
        state.categories.push(category.clone());
        category
    }

    pub(crate) fn remove_category(&self, name: &str) {
        self.lock().categories.retain(|c| c.name != name);
    }

    pub(crate) fn category_count(&self) -> usize {
        self.lock().categories.len()
    }

    pub(crate) fn role_count(&self, name: &str) -> usize {
        self.lock().roles.iter().filter(|r| r.name == name).count()
    }

    pub(crate) fn comment_count_for_post(&self, post_id: i64) -> usize {
        self.lock()
            .comments
            .iter()
            .filter(|c| c.post_id == post_id)
            .count()
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn create_user(&self, input: NewUser) -> Result<User, DomainError> {
        let mut state = self.lock();
        if state.users.iter().any(|u| u.username == input.username) {
            return Err(DomainError::AlreadyExists("username".to_string()));
        }
        if state.users.iter().any(|u| u.email == input.email) {
            return Err(DomainError::AlreadyExists("email".to_string()));
        }
        let stored = StoredUser {
            id: state.next_id(),
            name: input.name,
            username: input.username,
            email: input.email,
            password_hash: input.password_hash,
            role_ids: input.role_ids,
            created_at: Utc::now(),
        };
        state.users.push(stored.clone());
        Ok(state.to_user(&stored))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        let state = self.lock();
        Ok(state
            .users
            .iter()
            .find(|u| u.username == username)
            .map(|u| state.to_user(u)))
    }

    async fn find_by_username_or_email(
        &self,
        username_or_email: &str,
    ) -> Result<Option<UserCredentials>, DomainError> {
        let state = self.lock();
        let email = username_or_email.to_lowercase();
        Ok(state
            .users
            .iter()
            .find(|u| u.username == username_or_email || u.email == email)
            .map(|u| UserCredentials {
                user: state.to_user(u),
                password_hash: u.password_hash.clone(),
            }))
    }

    async fn exists_by_username(&self, username: &str) -> Result<bool, DomainError> {
        Ok(self.lock().users.iter().any(|u| u.username == username))
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        Ok(self.lock().users.iter().any(|u| u.email == email))
    }
}

#[async_trait]
impl RoleRepository for InMemoryStore {
    async fn find_by_name(&self, name: &str) -> Result<Option<Role>, DomainError> {
        Ok(self.lock().roles.iter().find(|r| r.name == name).cloned())
    }

    async fn create_role(&self, name: &str) -> Result<Role, DomainError> {
        let mut state = self.lock();
        if state.roles.iter().any(|r| r.name == name) {
            return Err(DomainError::AlreadyExists(format!("role {name}")));
        }
        let role = Role {
            id: state.next_id(),
            name: name.to_string(),
        };
        state.roles.push(role.clone());
        Ok(role)
    }
}

#[async_trait]
impl CategoryRepository for InMemoryStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<Category>, DomainError> {
        Ok(self.lock().categories.iter().find(|c| c.id == id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Category>, DomainError> {
        Ok(self
            .lock()
            .categories
            .iter()
            .find(|c| c.name == name)
            .cloned())
    }

    async fn list_categories(&self) -> Result<Vec<Category>, DomainError> {
        Ok(self.lock().categories.clone())
    }

    async fn create_category(&self, input: NewCategory) -> Result<Category, DomainError> {
        let mut state = self.lock();
        if state.categories.iter().any(|c| c.name == input.name) {
            return Err(DomainError::AlreadyExists(format!(
                "category {}",
                input.name
            )));
        }
        let category = Category {
            id: state.next_id(),
            name: input.name,
            description: input.description,
        };
        state.categories.push(category.clone());
        Ok(category)
    }
}

#[async_trait]
impl PostRepository for InMemoryStore {
    async fn create_post(&self, input: NewPost) -> Result<Post, DomainError> {
        let mut state = self.lock();
        state.check_post_refs(input.author_id, input.category_id)?;
        if state.title_taken(&input.title, None) {
            return Err(DomainError::AlreadyExists("post title".to_string()));
        }
        let now = Utc::now();
        let stored = StoredPost {
            id: state.next_id(),
            title: input.title,
            description: input.description,
            content: input.content,
            user_id: input.author_id,
            category_id: input.category_id,
            created_at: now,
            updated_at: now,
        };
        state.posts.push(stored.clone());
        state.to_post(&stored)
    }

    async fn get_post(&self, id: i64) -> Result<Option<Post>, DomainError> {
        let state = self.lock();
        state
            .posts
            .iter()
            .find(|p| p.id == id)
            .map(|p| state.to_post(p))
            .transpose()
    }

    async fn update_post(&self, id: i64, patch: PostPatch) -> Result<Option<Post>, DomainError> {
        let mut state = self.lock();
        let Some(index) = state.posts.iter().position(|p| p.id == id) else {
            return Ok(None);
        };
        let user_id = state.posts[index].user_id;
        state.check_post_refs(user_id, patch.category_id)?;
        if state.title_taken(&patch.title, Some(id)) {
            return Err(DomainError::AlreadyExists("post title".to_string()));
        }
        let post = &mut state.posts[index];
        post.title = patch.title;
        post.description = patch.description;
        post.content = patch.content;
        post.category_id = patch.category_id;
        post.updated_at = Utc::now();
        let stored = post.clone();
        state.to_post(&stored).map(Some)
    }

    async fn delete_post(&self, id: i64) -> Result<bool, DomainError> {
        let mut state = self.lock();
        let before = state.posts.len();
        state.posts.retain(|p| p.id != id);
        let deleted = state.posts.len() < before;
        if deleted {
            state.comments.retain(|c| c.post_id != id);
        }
        Ok(deleted)
    }

    async fn list_posts(
        &self,
        filter: &PostFilter,
        page: &PageRequest,
    ) -> Result<Vec<Post>, DomainError> {
        let state = self.lock();
        let mut posts: Vec<&StoredPost> = state
            .posts
            .iter()
            .filter(|p| state.matches(p, filter))
            .collect();
        posts.sort_by(|a, b| {
            let ordering = match page.sort.field {
                PostSortField::Id => Ordering::Equal,
                PostSortField::Title => a.title.cmp(&b.title),
                PostSortField::CreatedAt => a.created_at.cmp(&b.created_at),
                PostSortField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
            }
            .then(a.id.cmp(&b.id));
            match page.sort.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });

        let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        posts
            .into_iter()
            .skip(offset)
            .take(page.page_size as usize)
            .map(|p| state.to_post(p))
            .collect()
    }

    async fn count_posts(&self, filter: &PostFilter) -> Result<u64, DomainError> {
        let state = self.lock();
        Ok(state.posts.iter().filter(|p| state.matches(p, filter)).count() as u64)
    }

    async fn list_posts_by_category(&self, category_id: i64) -> Result<Vec<Post>, DomainError> {
        let state = self.lock();
        state
            .posts
            .iter()
            .filter(|p| p.category_id == category_id)
            .map(|p| state.to_post(p))
            .collect()
    }
}

#[async_trait]
impl CommentRepository for InMemoryStore {
    async fn create_comment(&self, input: NewComment) -> Result<Comment, DomainError> {
        let mut state = self.lock();
        if !state.posts.iter().any(|p| p.id == input.post_id) {
            return Err(DomainError::NotFound("post".to_string()));
        }
        if state.user(input.author_id).is_none() {
            return Err(DomainError::NotFound("author".to_string()));
        }
        let now = Utc::now();
        let stored = StoredComment {
            id: state.next_id(),
            body: input.body,
            post_id: input.post_id,
            user_id: input.author_id,
            created_at: now,
            updated_at: now,
        };
        state.comments.push(stored.clone());
        state.to_comment(&stored)
    }

    async fn get_comment(&self, id: i64) -> Result<Option<Comment>, DomainError> {
        let state = self.lock();
        state
            .comments
            .iter()
            .find(|c| c.id == id)
            .map(|c| state.to_comment(c))
            .transpose()
    }

    async fn list_by_post(&self, post_id: i64) -> Result<Vec<Comment>, DomainError> {
        let state = self.lock();
        state
            .comments
            .iter()
            .filter(|c| c.post_id == post_id)
            .map(|c| state.to_comment(c))
            .collect()
    }

    async fn update_comment(&self, id: i64, body: String) -> Result<Option<Comment>, DomainError> {
        let mut state = self.lock();
        let Some(comment) = state.comments.iter_mut().find(|c| c.id == id) else {
            return Ok(None);
        };
        comment.body = body;
        comment.updated_at = Utc::now();
        let stored = comment.clone();
        state.to_comment(&stored).map(Some)
    }

    async fn delete_comment(&self, id: i64) -> Result<bool, DomainError> {
        let mut state = self.lock();
        let before = state.comments.len();
        state.comments.retain(|c| c.id != id);
        Ok(state.comments.len() < before)
    }
}
