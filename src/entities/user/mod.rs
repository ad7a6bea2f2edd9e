//! User entity

pub mod filter;
pub mod model;

pub use filter::UserFilter;
pub use model::{USER_SCHEMA, User, UserCount, UserDraft, UserPatch};
