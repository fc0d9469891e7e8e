use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum DomainError {
    #[error("validation failed for '{field}': {message}")]
    Validation {
        field: &'static str,
        message: &'static str,
    },

    #[error("resource not found: {0}")]
    NotFound(String),

    #[error("resource already exists: {0}")]
    AlreadyExists(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("invalid credentials")]
    InvalidCredentials,

    /// Seed data the server relies on is missing.
    #[error("{0}")]
    Configuration(String),

    #[error("unexpected domain error: {0}")]
    Unexpected(String),
}
