//! Entity traits defining the core abstraction for all record types

use crate::core::field::{EntitySchema, FieldValue};
use chrono::{DateTime, Utc};
use serde::{Serialize, de::DeserializeOwned};
use uuid::Uuid;

/// Base trait for all entities in the dashboard.
///
/// Every entity has:
/// - id: opaque unique identifier assigned at creation
/// - created_at: creation timestamp
/// - updated_at: last modification timestamp
///
/// All three are assigned by the persistence layer and are immutable from
/// the client's perspective.
pub trait Entity: Clone + Send + Sync + Serialize + DeserializeOwned + 'static {
    /// The plural resource segment used in URLs (e.g. "credit-transactions")
    fn resource_name() -> &'static str {
        Self::schema().route
    }

    /// The canonical singular entity key (e.g. "credit_transaction")
    fn resource_name_singular() -> &'static str {
        Self::schema().entity
    }

    /// Static shape of this entity
    fn schema() -> &'static EntitySchema;

    /// Get the unique identifier for this entity instance
    fn id(&self) -> Uuid;

    /// Get the creation timestamp
    fn created_at(&self) -> DateTime<Utc>;

    /// Get the last update timestamp
    fn updated_at(&self) -> DateTime<Utc>;

    /// Bump `updated_at` to now
    fn touch(&mut self);
}

/// Trait for entities whose fields can be read dynamically.
///
/// Used by the persistence layer to apply query filters, search and sort
/// without knowing the concrete type.
pub trait Data: Entity {
    /// Fields searched by a free-text query when no keys are given
    fn indexed_fields() -> &'static [&'static str];

    /// Get the value of a specific field by name
    fn field_value(&self, field: &str) -> Option<FieldValue>;
}
