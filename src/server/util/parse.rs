//! Lenient conversions for loosely typed JSON request fields.
//!
//! The create-server form posts flags and strings that may arrive as booleans,
//! numbers, strings or `null`. These helpers fold them into the values the panel expects.

use serde_json::Value;

/// Interprets a JSON value as a boolean flag.
///
/// Strings count as set only when they read `"1"` or `"true"`; numbers when non-zero.
/// `null` is unset while arrays and objects are always set.
///
/// # Arguments
/// - `value` - The raw JSON value from the request body
///
/// # Returns
/// - `true` if the flag is set
pub fn parse_flag(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => s == "1" || s == "true",
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Renders a flag in the `"1"`/`"0"` form used by egg variables.
pub fn flag_to_egg_value(flag: bool) -> String {
    if flag { "1" } else { "0" }.to_string()
}

/// Returns the text of a JSON value if it is truthy.
///
/// Falsy values (`null`, `false`, `0`, empty string) yield `None`. Strings are returned
/// verbatim and any other truthy value is rendered as compact JSON text.
///
/// # Arguments
/// - `value` - The raw JSON value from the request body
///
/// # Returns
/// - `Some(String)` - Text form of a truthy value
/// - `None` - The value is falsy
pub fn truthy_text(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::Number(n) if n.as_f64().is_some_and(|n| n == 0.0) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
