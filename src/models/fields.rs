use serde_json::{Map, Value};

use crate::errors::AppError;

/// Flat field map as submitted by the editor forms.
pub type FieldMap = Map<String, Value>;

/// Text value of a field. Numbers are rendered as text; empty or
/// whitespace-only strings count as absent.
pub fn text(fields: &FieldMap, name: &str) -> Option<String> {
    match fields.get(name)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

pub fn required_text(fields: &FieldMap, name: &str) -> Result<String, AppError> {
    text(fields, name).ok_or_else(|| AppError::BadRequest(format!("Field '{name}' is required")))
}

pub fn required_int(fields: &FieldMap, name: &str) -> Result<i32, AppError> {
    let invalid = || AppError::BadRequest(format!("Field '{name}' must be an integer"));
    match fields.get(name) {
        Some(Value::Number(n)) => n
            .as_i64()
            .and_then(|v| i32::try_from(v).ok())
            .ok_or_else(invalid),
        Some(Value::String(s)) if !s.trim().is_empty() => {
            s.trim().parse::<i32>().map_err(|_| invalid())
        }
        _ => Err(AppError::BadRequest(format!("Field '{name}' is required"))),
    }
}
