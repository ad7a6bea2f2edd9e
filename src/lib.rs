//! # Influencer Dash
//!
//! The data model of an administrative dashboard for users, influencers and
//! the credit transactions linking them.
//!
//! ## Features
//!
//! - **Entity schemas**: typed records with optional nested relations and `_count` aggregates
//! - **Query filter contracts**: per-entity equality filters over a shared pagination/sort/relations query
//! - **Field validation**: declaration-ordered rules checked against raw JSON submissions
//! - **Route resolution**: URL segments mapped to canonical entity keys for access checks
//! - **Role-based access**: owner and customer roles from the application config
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use influencer_dash::prelude::*;
//! use serde_json::json;
//!
//! # async fn run() -> DashResult<()> {
//! let api = DashboardApi::in_memory();
//!
//! let influencer = api
//!     .create_influencer(json!({
//!         "name": "Jane",
//!         "location": "LA",
//!         "language": "EN",
//!         "genre": "Pop",
//!         "followers": 1000,
//!         "social_media_links": "http://x",
//!     }))
//!     .await?;
//!
//! let query = GetQuery {
//!     relations: vec!["credit_transaction.count".to_string()],
//!     ..Default::default()
//! };
//! let loaded = api.get_influencer_by_id(&influencer.id, &query).await?;
//! assert_eq!(loaded.count.and_then(|c| c.credit_transaction), Some(0));
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod core;
pub mod entities;
pub mod routes;
pub mod storage;

/// Re-exports of the most commonly used items
pub mod prelude {
    pub use crate::api::DashboardApi;
    pub use crate::config::AppConfig;
    pub use crate::core::{
        AccessChecker, AccessOperation, AccessPolicy, AuthContext, DashError, DashResult, Data,
        DataService, Entity, FieldValue, FilterContract, GetQuery, ListQuery, Page,
        PaginationMeta, RoleAccessChecker, Submission, ValidatableEntity, ValidationErrors,
    };
    pub use crate::core::auth::authorize_route;
    pub use crate::entities::*;
    pub use crate::routes::{convert_route_to_entity, resolve_route_strict};
    pub use crate::storage::InMemoryDataService;
    pub use crate::{impl_entity, impl_validated_entity};

    pub use async_trait::async_trait;
    pub use chrono::{DateTime, Utc};
    pub use uuid::Uuid;
}
