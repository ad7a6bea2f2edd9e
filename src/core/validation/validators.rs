//! Reusable field validators
//!
//! A validator receives the field name and its value (`Value::Null` when the
//! field is absent) and returns a human-readable message on failure. Only
//! `required` rejects absent values; every other validator lets them through.

use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

/// Validator: field is present, not null, and not an empty string
pub fn required() -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    |field: &str, value: &Value| match value {
        Value::Null => Err(format!("{} is a required field", field)),
        Value::String(s) if s.is_empty() => Err(format!("{} is a required field", field)),
        _ => Ok(()),
    }
}

/// Validator: value is a string
pub fn string() -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    |field: &str, value: &Value| match value {
        Value::Null | Value::String(_) => Ok(()),
        _ => Err(format!("{} must be a `string` type", field)),
    }
}

/// Validator: value is a number
pub fn number() -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    |field: &str, value: &Value| match value {
        Value::Null | Value::Number(_) => Ok(()),
        _ => Err(format!("{} must be a `number` type", field)),
    }
}

/// Validator: number has no fractional part
pub fn integer() -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    |field: &str, value: &Value| match value {
        Value::Number(n) if n.is_i64() || n.is_u64() => Ok(()),
        Value::Number(_) => Err(format!("{} must be an integer", field)),
        _ => Ok(()),
    }
}

/// Validator: number is zero or greater
pub fn non_negative() -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    |field: &str, value: &Value| match value.as_f64() {
        Some(num) if num < 0.0 => Err(format!(
            "{} must be greater than or equal to 0 (value: {})",
            field, num
        )),
        _ => Ok(()),
    }
}

/// Validator: string is an e-mail address
pub fn email() -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    |field: &str, value: &Value| match value.as_str() {
        Some(s) if !s.is_empty() && !is_valid_email(s) => {
            Err(format!("{} must be a valid email", field))
        }
        _ => Ok(()),
    }
}

/// Validator: string is a UUID (record identifier)
pub fn uuid() -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    |field: &str, value: &Value| match value.as_str() {
        Some(s) if !s.is_empty() && ::uuid::Uuid::parse_str(s).is_err() => {
            Err(format!("{} must be a valid identifier", field))
        }
        _ => Ok(()),
    }
}

pub(crate) fn is_valid_email(email: &str) -> bool {
    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
            .expect("static e-mail pattern compiles")
    });
    regex.is_match(email)
}
