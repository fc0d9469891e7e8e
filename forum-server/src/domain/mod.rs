pub(crate) mod actor;
pub(crate) mod category;
pub(crate) mod comment;
pub(crate) mod error;
pub(crate) mod page;
pub(crate) mod post;
pub(crate) mod role;
pub(crate) mod user;
