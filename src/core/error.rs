//! Typed error handling for the dashboard
//!
//! Callers can match on specific failures instead of dealing with a generic
//! `anyhow::Error`:
//!
//! ```rust,ignore
//! match api.create_credit_transaction(payload).await {
//!     Ok(tx) => println!("created {}", tx.id),
//!     Err(DashError::Validation(errors)) => show_inline(errors),
//!     Err(DashError::ReferenceMissing { field, .. }) => println!("unknown {field}"),
//!     Err(e) => eprintln!("request failed: {e}"),
//! }
//! ```

use crate::core::auth::AccessOperation;
use crate::core::validation::ValidationErrors;
use serde::Serialize;
use uuid::Uuid;

/// Result alias used across the crate
pub type DashResult<T> = Result<T, DashError>;

/// The main error type for the dashboard data model
#[derive(Debug, thiserror::Error)]
pub enum DashError {
    /// One or more fields of a submitted record are missing or malformed
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    /// A foreign identifier does not resolve to an existing record
    #[error("{entity}.{field} references missing record '{id}'")]
    ReferenceMissing {
        entity: &'static str,
        field: &'static str,
        id: Uuid,
    },

    /// Record was not found
    #[error("{entity} with id '{id}' not found")]
    NotFound { entity: &'static str, id: Uuid },

    /// Route segment has no entity mapping (strict resolution only)
    #[error("No entity is mapped to route segment '{segment}'")]
    UnmappedRoute { segment: String },

    /// Requested relation is not declared on the entity
    #[error("Unknown relation '{relation}' on {entity}")]
    UnknownRelation {
        entity: &'static str,
        relation: String,
    },

    /// Access policy denied the operation
    #[error("Operation '{operation}' on '{entity}' is not allowed")]
    Forbidden {
        entity: String,
        operation: AccessOperation,
    },

    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {0}")]
    Config(String),

    /// Failed to serialize/deserialize a record
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Persistence backend failure
    #[error("Storage error: {0}")]
    Storage(String),
}

/// Error body handed to the form/display layer
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Field-keyed messages for validation failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl DashError {
    /// Stable error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            DashError::Validation(_) => "VALIDATION_FAILED",
            DashError::ReferenceMissing { .. } => "REFERENCE_MISSING",
            DashError::NotFound { .. } => "ENTITY_NOT_FOUND",
            DashError::UnmappedRoute { .. } => "UNMAPPED_ROUTE",
            DashError::UnknownRelation { .. } => "UNKNOWN_RELATION",
            DashError::Forbidden { .. } => "FORBIDDEN",
            DashError::Config(_) => "CONFIG_ERROR",
            DashError::Serialization(_) => "SERIALIZATION_ERROR",
            DashError::Storage(_) => "STORAGE_ERROR",
        }
    }

    /// Whether correcting the submitted input can fix this error
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            DashError::Validation(_)
                | DashError::ReferenceMissing { .. }
                | DashError::UnknownRelation { .. }
        )
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            DashError::Validation(errors) => Some(serde_json::json!({ "fields": errors })),
            DashError::ReferenceMissing { entity, field, id } => Some(serde_json::json!({
                "entity": entity,
                "field": field,
                "id": id.to_string(),
            })),
            DashError::NotFound { entity, id } => Some(serde_json::json!({
                "entity": entity,
                "id": id.to_string(),
            })),
            _ => None,
        }
    }
}

impl From<ValidationErrors> for DashError {
    fn from(errors: ValidationErrors) -> Self {
        DashError::Validation(errors)
    }
}

impl From<serde_yaml::Error> for DashError {
    fn from(err: serde_yaml::Error) -> Self {
        DashError::Config(err.to_string())
    }
}
