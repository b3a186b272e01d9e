//! Value literals
//!
//! Every stored value is JSON-like. Literals typed at the prompt are
//! parsed permissively: anything that is not valid JSON (after swapping
//! single quotes for double quotes) degrades to a number or a plain
//! string instead of failing the command.

mod display;

pub use display::{render_compact, render_pretty, render_plain};

use serde_json::Number;

/// Runtime value stored in branches, cells and event logs.
pub type Value = serde_json::Value;

/// Largest integer a double can hold exactly.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

// ═══════════════════════════════════════════════════════════════════════
// Literal Parsing
// ═══════════════════════════════════════════════════════════════════════

/// Parse a literal as JSON after replacing every `'` with `"`.
pub fn parse_json(text: &str) -> Option<Value> {
    let normalized = text.replace('\'', "\"");
    serde_json::from_str::<Value>(&normalized)
        .ok()
        .map(normalize_numbers)
}

/// Value for `kv_put`: JSON, else the text with its outer quotes removed.
pub fn parse_put_value(text: &str) -> Value {
    parse_json(text).unwrap_or_else(|| Value::String(strip_outer_quotes(text).to_string()))
}

/// Value for `state_set`: JSON, else a number, else the raw text.
pub fn parse_cell_value(text: &str) -> Value {
    parse_json(text)
        .or_else(|| coerce_number(text))
        .unwrap_or_else(|| Value::String(text.to_string()))
}

/// Value for `state_cas`: a number, else the raw text (quotes kept).
pub fn parse_cas_value(text: &str) -> Value {
    coerce_number(text).unwrap_or_else(|| Value::String(text.to_string()))
}

/// Payload for `event_append`: JSON, else the raw text.
pub fn parse_event_payload(text: &str) -> Value {
    parse_json(text).unwrap_or_else(|| Value::String(text.to_string()))
}

/// Remove one leading and one trailing quote character, if present.
pub fn strip_outer_quotes(text: &str) -> &str {
    let is_quote = |c: char| c == '"' || c == '\'';
    let text = text.strip_prefix(is_quote).unwrap_or(text);
    text.strip_suffix(is_quote).unwrap_or(text)
}

// ═══════════════════════════════════════════════════════════════════════
// Numeric Coercion
// ═══════════════════════════════════════════════════════════════════════

/// Coerce text to a number the way a browser's `Number(text)` does.
///
/// Surrounding whitespace is ignored and empty text is zero. Accepts
/// signed decimals with optional exponent and unsigned `0x`/`0o`/`0b`
/// integers. Infinities have no JSON form, so they do not coerce.
pub fn coerce_number(text: &str) -> Option<Value> {
    let text = text.trim();
    if text.is_empty() {
        return Some(Value::from(0));
    }

    for (prefix, radix) in [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)] {
        if let Some(digits) = text.strip_prefix(prefix) {
            return u64::from_str_radix(digits, radix)
                .ok()
                .and_then(|n| number_value(n as f64));
        }
    }

    let decimal_chars = text
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'));
    if !decimal_chars || !text.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }
    text.parse::<f64>().ok().and_then(number_value)
}

/// Build a JSON number, preferring an integer when the float is whole.
fn number_value(n: f64) -> Option<Value> {
    if !n.is_finite() {
        return None;
    }
    if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER {
        return Some(Value::from(n as i64));
    }
    Number::from_f64(n).map(Value::Number)
}

/// Collapse whole floats (`1.0`) to integers so `1.0` and `1` print alike.
fn normalize_numbers(value: Value) -> Value {
    match value {
        Value::Number(n) if !n.is_i64() && !n.is_u64() => match n.as_f64().and_then(number_value) {
            Some(v) => v,
            None => Value::Number(n),
        },
        Value::Array(items) => Value::Array(items.into_iter().map(normalize_numbers).collect()),
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| (k, normalize_numbers(v)))
                .collect(),
        ),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_json_single_quotes() {
        assert_eq!(parse_json("{'a': 1}"), Some(json!({"a": 1})));
        assert_eq!(parse_json("'hi'"), Some(json!("hi")));
        assert_eq!(parse_json("[1, 2]"), Some(json!([1, 2])));
        assert_eq!(parse_json("not json"), None);
    }

    #[test]
    fn test_parse_json_whole_floats_become_integers() {
        assert_eq!(parse_json("2.0"), Some(json!(2)));
        assert_eq!(parse_json("[1.0, 2.5]"), Some(json!([1, 2.5])));
    }

    #[test]
    fn test_put_value_fallback_strips_quotes() {
        assert_eq!(parse_put_value("hello"), json!("hello"));
        assert_eq!(parse_put_value("'it's'"), json!("it's"));
        assert_eq!(parse_put_value("\"open"), json!("open"));
        assert_eq!(parse_put_value("42"), json!(42));
    }

    #[test]
    fn test_strip_outer_quotes() {
        assert_eq!(strip_outer_quotes("'abc'"), "abc");
        assert_eq!(strip_outer_quotes("\"abc'"), "abc");
        assert_eq!(strip_outer_quotes("abc"), "abc");
        assert_eq!(strip_outer_quotes("'"), "");
    }

    #[test]
    fn test_cell_value_numeric_fallback() {
        assert_eq!(parse_cell_value("0x10"), json!(16));
        assert_eq!(parse_cell_value(" 7 "), json!(7));
        assert_eq!(parse_cell_value("1e3"), json!(1000));
        assert_eq!(parse_cell_value("abc"), json!("abc"));
        assert_eq!(parse_cell_value("{'x': true}"), json!({"x": true}));
    }

    #[test]
    fn test_cas_value_keeps_quotes() {
        assert_eq!(parse_cas_value("5"), json!(5));
        assert_eq!(parse_cas_value("'done'"), json!("'done'"));
    }

    #[test]
    fn test_coerce_number() {
        assert_eq!(coerce_number(""), Some(json!(0)));
        assert_eq!(coerce_number("-3.5"), Some(json!(-3.5)));
        assert_eq!(coerce_number(".5"), Some(json!(0.5)));
        assert_eq!(coerce_number("0b101"), Some(json!(5)));
        assert_eq!(coerce_number("inf"), None);
        assert_eq!(coerce_number("nan"), None);
        assert_eq!(coerce_number("1e400"), None);
        assert_eq!(coerce_number("1.2.3"), None);
        assert_eq!(coerce_number("-"), None);
    }

    #[test]
    fn test_event_payload_fallback_is_raw() {
        assert_eq!(parse_event_payload("'clicked'"), json!("clicked"));
        assert_eq!(parse_event_payload("user clicked"), json!("user clicked"));
    }
}
