//! Validation and filtering system
//!
//! Each entity declares an ordered set of per-field rules. A candidate
//! record (a JSON object from a form submission) is normalized by the
//! field filters and then checked by the validators before it may be
//! turned into a draft or patch.

pub mod config;
pub mod filters;
pub mod validators;

pub use config::{EntityValidationConfig, ValidationErrors};

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The kind of submission a payload is validated for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Submission {
    /// Every declared field is checked
    Create,
    /// Only fields present in the payload are checked
    Update,
}

/// Trait for entities that declare validation rules
///
/// Implemented by the `impl_validated_entity!` macro
pub trait ValidatableEntity {
    /// Get the validation configuration for a submission kind
    fn validation_config(submission: Submission) -> EntityValidationConfig;

    /// Validate a candidate record
    fn validate_payload(submission: Submission, payload: &Value) -> Result<(), ValidationErrors> {
        Self::validation_config(submission).validate(payload)
    }
}
