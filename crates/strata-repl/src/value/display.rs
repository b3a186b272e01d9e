//! Rendering values for the playground output
//!
//! Structured values print as JSON with every `"` swapped for `'`, which
//! makes them read like Python literals.

use serde::Serialize;

use crate::error::{ReplError, Result};
use crate::value::Value;

/// Render as two-space indented JSON with single quotes.
pub fn render_pretty<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value)
        .map(|s| s.replace('"', "'"))
        .map_err(ReplError::internal)
}

/// Render as single-line JSON with single quotes (`['a','b']`).
pub fn render_compact<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string(value)
        .map(|s| s.replace('"', "'"))
        .map_err(ReplError::internal)
}

/// Render a bare value: strings without quotes, scalars as-is.
///
/// Arrays join their elements with `,` (nulls become empty), the way a
/// browser stringifies them. Objects fall back to compact JSON.
pub fn render_plain(value: &Value) -> Result<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Null => Ok("null".to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Array(items) => {
            let parts = items
                .iter()
                .map(|item| match item {
                    Value::Null => Ok(String::new()),
                    other => render_plain(other),
                })
                .collect::<Result<Vec<_>>>()?;
            Ok(parts.join(","))
        }
        Value::Object(_) => render_compact(value),
    }
}
