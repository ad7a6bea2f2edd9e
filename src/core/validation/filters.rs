//! Reusable field filters
//!
//! These filters normalize submitted values before validation

use anyhow::{Result, anyhow};
use serde_json::{Number, Value};

/// Filter: turn a whole float (`1000.0`) into an integer (`1000`)
///
/// Form number inputs may submit whole numbers as floats. Fractional values
/// are left alone so the `integer` validator can report them.
pub fn integral() -> impl Fn(&str, Value) -> Result<Value> + Send + Sync + Clone {
    |field: &str, value: Value| match value.as_f64() {
        Some(num) if value.is_f64() && num.fract() == 0.0 => {
            if num.abs() >= (i64::MAX as f64) {
                return Err(anyhow!("{} is out of range", field));
            }
            Ok(Value::Number(Number::from(num as i64)))
        }
        _ => Ok(value),
    }
}
