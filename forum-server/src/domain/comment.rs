use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::post::{Author, validate_positive_i64};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Comment {
    pub(crate) id: i64,
    pub(crate) body: String,
    pub(crate) post_id: i64,
    pub(crate) author: Author,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
}

impl Comment {
    pub(crate) fn new(
        id: i64,
        body: impl Into<String>,
        post_id: i64,
        author: Author,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        validate_positive_i64("id", id)?;
        validate_positive_i64("post_id", post_id)?;
        validate_positive_i64("author_id", author.id)?;

        Ok(Self {
            id,
            body: body.into(),
            post_id,
            author,
            created_at,
            updated_at,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct CommentDraft {
    pub(crate) body: String,
}

impl CommentDraft {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        let body = self.body.trim();
        if body.is_empty() {
            return Err(DomainError::Validation {
                field: "body",
                message: "Comment body must not be empty",
            });
        }
        Ok(Self {
            body: body.to_string(),
        })
    }
}
