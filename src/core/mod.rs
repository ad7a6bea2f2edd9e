//! Core module containing the fundamental traits and types of the data model

pub mod auth;
pub mod entity;
pub mod error;
pub mod field;
pub mod query;
pub mod service;
pub mod store;
pub mod validation;

pub use auth::{AccessChecker, AccessOperation, AccessPolicy, AuthContext, RoleAccessChecker};
pub use entity::{Data, Entity};
pub use error::{DashError, DashResult, ErrorResponse};
pub use field::{Cardinality, EntitySchema, FieldKind, FieldSpec, FieldValue, RelationSpec};
pub use query::{FilterContract, GetQuery, ListQuery, Page, PaginationMeta};
pub use service::DataService;
pub use store::QueryableStore;
pub use validation::{EntityValidationConfig, Submission, ValidatableEntity, ValidationErrors};
