//! Utility functions shared by the passes and the shaper.

use serde_json::Value;

/// Maximum digits in a list item number (`1.` through `99.`)
pub const MAX_MARKER_DIGITS: usize = 2;

/// Length of a leading `<1-2 digits>.` marker, including the period.
///
/// The digit run must be maximal: `123.` is not a marker.
pub fn number_marker_len(text: &str) -> Option<usize> {
    let digits = text.bytes().take_while(u8::is_ascii_digit).count();
    if (1..=MAX_MARKER_DIGITS).contains(&digits) && text.as_bytes().get(digits) == Some(&b'.') {
        Some(digits + 1)
    } else {
        None
    }
}

/// Check if text starts with a numbered list item: `<1-2 digits>.` then whitespace
pub fn is_numbered_item(text: &str) -> bool {
    number_marker_len(text)
        .and_then(|len| text[len..].chars().next())
        .is_some_and(char::is_whitespace)
}

/// Check if a line holds nothing but whitespace
pub fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// JSON truthiness: `null`, `false`, `0`, `""`, `[]` and `{}` are false
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// Coerce an optional JSON value into text: absent/null become empty,
/// strings pass through, anything else becomes its compact JSON form
pub fn value_to_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
