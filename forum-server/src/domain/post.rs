use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// Denormalized author fields carried by posts and comments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct Author {
    pub(crate) id: i64,
    pub(crate) username: String,
    pub(crate) name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Post {
    pub(crate) id: i64,
    pub(crate) title: String,
    pub(crate) description: String,
    pub(crate) content: String,
    pub(crate) author: Author,
    pub(crate) category_id: i64,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
}

/// Client-supplied fields of a post, shared by create and update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct PostDraft {
    pub(crate) title: String,
    pub(crate) description: String,
    pub(crate) content: String,
    pub(crate) category_id: Option<i64>,
}

impl PostDraft {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        Ok(Self {
            title: normalize_title(&self.title)?,
            description: normalize_description(&self.description)?,
            content: normalize_content(&self.content)?,
            category_id: self.category_id,
        })
    }
}

impl Post {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        id: i64,
        title: impl Into<String>,
        description: impl Into<String>,
        content: impl Into<String>,
        author: Author,
        category_id: i64,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        validate_positive_i64("id", id)?;
        validate_positive_i64("author_id", author.id)?;
        validate_positive_i64("category_id", category_id)?;

        if updated_at < created_at {
            return Err(DomainError::Validation {
                field: "updated_at",
                message: "must be >= created_at",
            });
        }

        Ok(Self {
            id,
            title: title.into(),
            description: description.into(),
            content: content.into(),
            author,
            category_id,
            created_at,
            updated_at,
        })
    }
}

pub(crate) fn validate_positive_i64(field: &'static str, value: i64) -> Result<(), DomainError> {
    if value <= 0 {
        return Err(DomainError::Validation {
            field,
            message: "must be > 0",
        });
    }
    Ok(())
}

fn normalize_title(title: &str) -> Result<String, DomainError> {
    let title = title.trim();
    let len = title.chars().count();
    if !(2..=255).contains(&len) {
        return Err(DomainError::Validation {
            field: "title",
            message: "Post title should have at least 2 characters",
        });
    }
    Ok(title.to_string())
}

fn normalize_description(description: &str) -> Result<String, DomainError> {
    let description = description.trim();
    if description.chars().count() < 10 {
        return Err(DomainError::Validation {
            field: "description",
            message: "Post description should have at least 10 characters",
        });
    }
    Ok(description.to_string())
}

fn normalize_content(content: &str) -> Result<String, DomainError> {
    let content = content.trim();
    if content.is_empty() {
        return Err(DomainError::Validation {
            field: "content",
            message: "must not be empty",
        });
    }
    Ok(content.to_string())
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::{Author, DomainError, Post, PostDraft};

    fn draft(title: &str, description: &str, content: &str) -> PostDraft {
        PostDraft {
            title: title.to_string(),
            description: description.to_string(),
            content: content.to_string(),
            category_id: None,
        }
    }

    fn author(id: i64) -> Author {
        Author {
            id,
            username: "author".to_string(),
            name: "Author".to_string(),
        }
    }

    #[test]
    fn draft_rejects_one_char_title() {
        let err = draft("  a  ", "long enough description", "body")
            .validate()
            .expect_err("title must be rejected");
        assert_validation_field(err, "title");
    }

    #[test]
    fn draft_rejects_short_description() {
        let err = draft("title", "too short", "body")
            .validate()
            .expect_err("description must be rejected");
        assert_validation_field(err, "description");
    }

    #[test]
    fn draft_rejects_blank_content() {
        let err = draft("title", "long enough description", "   ")
            .validate()
            .expect_err("content must be rejected");
        assert_validation_field(err, "content");
    }

    #[test]
    fn draft_normalizes_fields_and_keeps_category() {
        let mut input = draft("  Hi  ", "  ten chars!  ", "  content  ");
        input.category_id = Some(3);

        let validated = input.validate().expect("must validate");
        assert_eq!(validated.title, "Hi");
        assert_eq!(validated.description, "ten chars!");
        assert_eq!(validated.content, "content");
        assert_eq!(validated.category_id, Some(3));
    }

    #[test]
    fn post_new_builds_post() {
        let created_at = Utc::now();
        let updated_at = created_at + Duration::seconds(1);

        let post = Post::new(
            1,
            "Title",
            "Description",
            "Content",
            author(10),
            2,
            created_at,
            updated_at,
        )
        .expect("post should be created");

        assert_eq!(post.id, 1);
        assert_eq!(post.author.id, 10);
        assert_eq!(post.category_id, 2);
    }

    #[test]
    fn post_new_rejects_non_positive_author_id() {
        let now = Utc::now();
        let err = Post::new(1, "Title", "Description", "Content", author(0), 1, now, now)
            .expect_err("author_id must be > 0");
        assert_validation_field(err, "author_id");
    }

    #[test]
    fn post_new_rejects_updated_before_created() {
        let updated_at = Utc::now();
        let created_at = updated_at + Duration::seconds(1);

        let err = Post::new(
            1,
            "Title",
            "Description",
            "Content",
            author(10),
            1,
            created_at,
            updated_at,
        )
        .expect_err("updated_at < created_at must fail");
        assert_validation_field(err, "updated_at");
    }

    fn assert_validation_field(err: DomainError, expected_field: &'static str) {
        match err {
            DomainError::Validation { field, .. } => assert_eq!(field, expected_field),
            _ => panic!("expected DomainError::Validation"),
        }
    }
}
