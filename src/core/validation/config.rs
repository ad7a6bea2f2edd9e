//! Per-entity validation configuration

use anyhow::Result;
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

type Validator = Arc<dyn Fn(&str, &Value) -> Result<(), String> + Send + Sync>;
type Filter = Arc<dyn Fn(&str, Value) -> Result<Value> + Send + Sync>;

/// Key used when the candidate is not a JSON object at all
pub const RECORD_KEY: &str = "record";

/// Field-keyed validation messages, in field-declaration order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(IndexMap<String, String>);

impl ValidationErrors {
    /// Record a failure; the first message for a field wins
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_insert_with(|| message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Message for a field, if it failed
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// Failing field names in declaration order
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// `Ok(())` when empty, `Err(self)` otherwise
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .0
            .iter()
            .map(|(field, message)| format!("{}: {}", field, message))
            .collect::<Vec<_>>()
            .join("; ");
        write!(f, "{}", joined)
    }
}

impl std::error::Error for ValidationErrors {}

impl From<validator::ValidationErrors> for ValidationErrors {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut ordered: Vec<_> = errors.field_errors().into_iter().collect();
        ordered.sort_by(|a, b| a.0.cmp(&b.0));

        let mut out = ValidationErrors::default();
        for (field, failures) in ordered {
            if let Some(failure) = failures.first() {
                let message = match &failure.message {
                    Some(message) => message.to_string(),
                    None => format!("{} is invalid ({})", field, failure.code),
                };
                out.add(field.to_string(), message);
            }
        }
        out
    }
}

#[derive(Clone, Default)]
struct FieldRules {
    validators: Vec<Validator>,
    filters: Vec<Filter>,
}

/// Ordered validation and filtering rules for one entity and one operation
///
/// # Example
/// ```
/// use influencer_dash::core::validation::{EntityValidationConfig, validators};
/// use serde_json::json;
///
/// let mut config = EntityValidationConfig::new("influencer");
/// config.add_validator("name", validators::required());
/// config.add_validator("name", validators::string());
///
/// assert!(config.validate(&json!({ "name": "Jane" })).is_ok());
/// assert!(config.validate(&json!({ "name": "" })).is_err());
/// ```
#[derive(Clone)]
pub struct EntityValidationConfig {
    entity_type: String,
    fields: IndexMap<String, FieldRules>,
    partial: bool,
}

impl EntityValidationConfig {
    pub fn new(entity_type: impl Into<String>) -> Self {
        Self {
            entity_type: entity_type.into(),
            fields: IndexMap::new(),
            partial: false,
        }
    }

    /// Only check fields present in the payload (partial update)
    pub fn partial(mut self) -> Self {
        self.partial = true;
        self
    }

    pub fn entity_type(&self) -> &str {
        &self.entity_type
    }

    /// Declared field names, in evaluation order
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn add_validator<F>(&mut self, field: &str, validator: F)
    where
        F: Fn(&str, &Value) -> Result<(), String> + Send + Sync + 'static,
    {
        self.fields
            .entry(field.to_string())
            .or_default()
            .validators
            .push(Arc::new(validator));
    }

    pub fn add_filter<F>(&mut self, field: &str, filter: F)
    where
        F: Fn(&str, Value) -> Result<Value> + Send + Sync + 'static,
    {
        self.fields
            .entry(field.to_string())
            .or_default()
            .filters
            .push(Arc::new(filter));
    }

    /// Check a candidate record without modifying it
    pub fn validate(&self, payload: &Value) -> Result<(), ValidationErrors> {
        self.validate_and_filter(payload.clone()).map(|_| ())
    }

    /// Apply filters to declared fields, then validate every declared field.
    ///
    /// All fields are checked in declaration order; each failing field gets
    /// the message of its first failing validator. Undeclared fields pass
    /// through untouched.
    pub fn validate_and_filter(&self, payload: Value) -> Result<Value, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let Value::Object(mut object) = payload else {
            errors.add(RECORD_KEY, format!("{} must be an object", self.entity_type));
            return Err(errors);
        };

        for (field, rules) in &self.fields {
            let present = object.contains_key(field);
            if self.partial && !present {
                continue;
            }

            let mut value = object.remove(field).unwrap_or(Value::Null);
            for filter in &rules.filters {
                match filter(field.as_str(), value.clone()) {
                    Ok(filtered) => value = filtered,
                    Err(e) => {
                        errors.add(field.as_str(), e.to_string());
                        break;
                    }
                }
            }

            let failure = rules
                .validators
                .iter()
                .find_map(|v| v(field.as_str(), &value).err());
            if let Some(message) = failure {
                errors.add(field.as_str(), message);
            }

            if present {
                object.insert(field.clone(), value);
            }
        }

        errors.into_result().map(|_| Value::Object(object))
    }
}

impl fmt::Debug for EntityValidationConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityValidationConfig")
            .field("entity_type", &self.entity_type)
            .field("fields", &self.fields.keys().collect::<Vec<_>>())
            .field("partial", &self.partial)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::validation::{filters, validators};
    use serde_json::json;

    fn sample_config() -> EntityValidationConfig {
        let mut config = EntityValidationConfig::new("sample");
        config.add_validator("title", validators::required());
        config.add_validator("title", validators::string());
        config.add_filter("count", filters::integral());
        config.add_validator("count", validators::required());
        config.add_validator("count", validators::number());
        config.add_validator("count", validators::integer());
        config
    }

    #[test]
    fn test_valid_payload_passes() {
        let config = sample_config();
        assert!(config.validate(&json!({ "title": "a", "count": 3 })).is_ok());
    }

    #[test]
    fn test_all_failing_fields_reported_in_order() {
        let config = sample_config();
        let errors = config.validate(&json!({ "count": 1.5 })).unwrap_err();
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["title", "count"]);
        assert_eq!(errors.get("count"), Some("count must be an integer"));
    }

    #[test]
    fn test_first_failing_validator_wins() {
        let config = sample_config();
        let errors = config.validate(&json!({ "title": "a" })).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("count"), Some("count is a required field"));
    }

    #[test]
    fn test_filters_apply_before_validation() {
        let config = sample_config();
        let filtered = config
            .validate_and_filter(json!({ "title": "a", "count": 4.0, "extra": true }))
            .unwrap();
        assert_eq!(filtered, json!({ "title": "a", "count": 4, "extra": true }));
    }

    #[test]
    fn test_partial_skips_absent_fields() {
        let config = sample_config().partial();
        assert!(config.validate(&json!({})).is_ok());
        assert!(config.validate(&json!({ "title": "" })).is_err());
    }

    #[test]
    fn test_non_object_rejected() {
        let config = sample_config();
        let errors = config.validate(&json!([1, 2])).unwrap_err();
        assert_eq!(errors.get(RECORD_KEY), Some("sample must be an object"));
    }

    #[test]
    fn test_errors_display() {
        let mut errors = ValidationErrors::default();
        errors.add("name", "bad");
        errors.add("name", "ignored");
        errors.add("genre", "worse");
        assert_eq!(errors.to_string(), "name: bad; genre: worse");
    }
}
