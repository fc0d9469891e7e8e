use tracing::{info, warn};

use crate::data::comment_repository::{CommentRepository, NewComment};
use crate::data::post_repository::PostRepository;
use crate::data::user_repository::UserRepository;
use crate::domain::actor::Actor;
use crate::domain::comment::{Comment, CommentDraft};
use crate::domain::error::DomainError;

const NOT_OWNER_MESSAGE: &str = "You can only modify your own comments.";
const WRONG_POST_MESSAGE: &str = "Comment does not belong to post";

pub(crate) struct CommentService<C, P, U>
where
    C: CommentRepository,
    P: PostRepository,
    U: UserRepository,
{
    comments: C,
    posts: P,
    users: U,
}

impl<C, P, U> CommentService<C, P, U>
where
    C: CommentRepository,
    P: PostRepository,
    U: UserRepository,
{
    pub(crate) fn new(comments: C, posts: P, users: U) -> Self {
        Self {
            comments,
            posts,
            users,
        }
    }

    pub(crate) async fn create_comment(
        &self,
        actor: &Actor,
        post_id: i64,
        draft: CommentDraft,
    ) -> Result<Comment, DomainError> {
        let draft = draft.validate()?;
        self.ensure_post_exists(post_id).await?;

        let user = self
            .users
            .find_by_username(&actor.username)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("user username: {}", actor.username)))?;

        let comment = self
            .comments
            .create_comment(NewComment {
                body: draft.body,
                post_id,
                author_id: user.id,
            })
            .await?;
        info!(comment_id = comment.id, post_id, author_id = user.id, "comment created");
        Ok(comment)
    }

    pub(crate) async fn get_comments_by_post_id(
        &self,
        post_id: i64,
    ) -> Result<Vec<Comment>, DomainError> {
        self.ensure_post_exists(post_id).await?;
        self.comments.list_by_post(post_id).await
    }

    pub(crate) async fn get_comment_by_id(
        &self,
        post_id: i64,
        comment_id: i64,
    ) -> Result<Comment, DomainError> {
        self.ensure_post_exists(post_id).await?;
        self.find_comment_on_post(post_id, comment_id).await
    }

    pub(crate) async fn update_comment(
        &self,
        actor: &Actor,
        post_id: i64,
        comment_id: i64,
        draft: CommentDraft,
    ) -> Result<Comment, DomainError> {
        let draft = draft.validate()?;
        self.ensure_post_exists(post_id).await?;
        let comment = self.find_comment_on_post(post_id, comment_id).await?;
        self.ensure_can_modify(actor, &comment)?;

        self.comments
            .update_comment(comment_id, draft.body)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("comment id: {comment_id}")))
    }

    pub(crate) async fn delete_comment(
        &self,
        actor: &Actor,
        post_id: i64,
        comment_id: i64,
    ) -> Result<(), DomainError> {
        self.ensure_post_exists(post_id).await?;
        let comment = self.find_comment_on_post(post_id, comment_id).await?;
        self.ensure_can_modify(actor, &comment)?;

        if !self.comments.delete_comment(comment_id).await? {
            return Err(DomainError::NotFound(format!("comment id: {comment_id}")));
        }
        info!(comment_id, post_id, actor_id = actor.user_id, "comment deleted");
        Ok(())
    }

    async fn ensure_post_exists(&self, post_id: i64) -> Result<(), DomainError> {
        match self.posts.get_post(post_id).await? {
            Some(_) => Ok(()),
            None => Err(DomainError::NotFound(format!("post id: {post_id}"))),
        }
    }

    async fn find_comment_on_post(
        &self,
        post_id: i64,
        comment_id: i64,
    ) -> Result<Comment, DomainError> {
        let comment = self
            .comments
            .get_comment(comment_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("comment id: {comment_id}")))?;

        if comment.post_id != post_id {
            return Err(DomainError::BadRequest(WRONG_POST_MESSAGE.to_string()));
        }
        Ok(comment)
    }

    fn ensure_can_modify(&self, actor: &Actor, comment: &Comment) -> Result<(), DomainError> {
        actor
            .ensure_owner_or_admin(comment.author.id, NOT_OWNER_MESSAGE)
            .inspect_err(|_| {
                warn!(
                    comment_id = comment.id,
                    actor_id = actor.user_id,
                    "comment mutation forbidden"
                );
            })
    }
}
