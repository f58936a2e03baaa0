//! JSON text extraction
//!
//! Flattens an arbitrary JSON value into `path: value` lines. Object keys
//! extend the path with `.key`, array elements with `[index]` (or `item_index`
//! at the top level). Nulls are skipped.

use crate::error::{ExtractError, Result};
use serde_json::Value;

/// Parse UTF-8 JSON bytes and flatten them into text
pub fn extract_text(bytes: &[u8]) -> Result<String> {
    let raw = std::str::from_utf8(bytes)
        .map_err(|e| ExtractError::JsonParse(format!("invalid UTF-8: {}", e)))?;
    let value: Value = serde_json::from_str(raw)?;
    Ok(flatten(&value))
}

/// Flatten a parsed value into newline-separated lines
pub fn flatten(value: &Value) -> String {
    let mut lines = Vec::new();
    visit(value, "", &mut lines);
    lines.retain(|line| !line.is_empty());
    lines.join("\n")
}

fn visit(value: &Value, prefix: &str, lines: &mut Vec<String>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", prefix, key)
                };
                visit_entry(child, &path, lines);
            }
        }
        Value::Array(items) => {
            for (index, child) in items.iter().enumerate() {
                let path = if prefix.is_empty() {
                    format!("item_{}", index)
                } else {
                    format!("{}[{}]", prefix, index)
                };
                visit_entry(child, &path, lines);
            }
        }
        Value::Null => {}
        scalar => lines.push(scalar_text(scalar)),
    }
}

fn visit_entry(value: &Value, path: &str, lines: &mut Vec<String>) {
    match value {
        Value::Object(_) | Value::Array(_) => visit(value, path, lines),
        Value::Null => {}
        scalar => lines.push(format!("{}: {}", path, scalar_text(scalar))),
    }
}

/// Strings are trimmed unless that would leave nothing; other scalars use
/// their JSON rendering, so booleans read `true`/`false`.
fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) if !s.trim().is_empty() => s.trim().to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
