//! Display-string conversion.
//!
//! Selection state is stored and compared as strings, so every value that
//! can appear in a list parameter needs a string form. The conversion is
//! total and side-effect-free: scalars print their JSON form without
//! quotes, structured values serialize compactly, and null maps to the
//! empty string.

use serde_json::Value;

/// Convert any JSON value to its display string.
pub fn display_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}
