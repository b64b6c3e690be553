//! Payload shaping: clean every text field of a raw script payload.

use serde_json::{Map, Value};

use crate::document::{InvalidPayload, ScriptData, ScriptDocument, Section, ShapedPayload};
use crate::service::clean_block;
use crate::utilities::{is_truthy, value_to_text};

/// Error reported for payloads that are not JSON objects
pub const INVALID_PAYLOAD_TYPE: &str = "Invalid payload type";

/// Shape a raw payload into a cleaned [`ScriptDocument`].
///
/// Missing, null or mistyped fields become empty blocks; unknown fields are
/// dropped. Only a non-object payload is rejected, and that is reported in
/// the returned value rather than as an error.
pub fn shape(payload: &Value) -> ShapedPayload {
    let Some(record) = payload.as_object() else {
        tracing::debug!(kind = value_kind(payload), "rejecting payload that is not an object");
        return ShapedPayload::Invalid(InvalidPayload::new(INVALID_PAYLOAD_TYPE));
    };

    let success = record.get("success").map_or(true, is_truthy);
    let data = record.get("data").and_then(Value::as_object);

    let raw = ScriptDocument::new(
        success,
        ScriptData {
            title: value_to_text(field(data, "title")).trim().to_string(),
            introduction: section(data, "introduction"),
            main_content: section(data, "mainContent"),
            conclusion: section(data, "conclusion"),
        },
    );

    ShapedPayload::Cleaned(raw.map_text(|text| clean_block(Some(text))))
}

fn field<'a>(record: Option<&'a Map<String, Value>>, key: &str) -> Option<&'a Value> {
    record.and_then(|map| map.get(key))
}

fn section(data: Option<&Map<String, Value>>, key: &str) -> Section {
    let record = field(data, key).and_then(Value::as_object);
    Section::new(value_to_text(field(record, "script")))
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn cleaned(value: Value) -> ScriptDocument {
        match shape(&value) {
            ShapedPayload::Cleaned(doc) => doc,
            ShapedPayload::Invalid(invalid) => panic!("unexpected rejection: {invalid:?}"),
        }
    }

    #[test]
    fn test_invalid_types() {
        for value in [json!(42), json!(null), json!([1, 2, 3]), json!("text"), json!(true)] {
            let shaped = shape(&value);
            assert_eq!(
                serde_json::to_value(&shaped).unwrap(),
                json!({"success": false, "error": "Invalid payload type"})
            );
        }
    }

    #[test]
    fn test_empty_object_keeps_shape() {
        let value = serde_json::to_value(shape(&json!({}))).unwrap();
        assert_eq!(
            value,
            json!({
                "success": true,
                "data": {
                    "title": "",
                    "introduction": {"script": ""},
                    "mainContent": {"script": ""},
                    "conclusion": {"script": ""}
                }
            })
        );
    }

    #[test]
    fn test_end_to_end() {
        let doc = cleaned(json!({
            "success": true,
            "data": {
                "title": "**My** Title",
                "introduction": {"script": "1. Hi 2. Bye"},
                "mainContent": {},
                "conclusion": {"script": null}
            }
        }));
        assert!(doc.success);
        assert_eq!(doc.data.title, "My Title");
        assert_eq!(doc.data.introduction.script, "1. Hi\n\n2. Bye");
        assert_eq!(doc.data.main_content.script, "");
        assert_eq!(doc.data.conclusion.script, "");
    }

    #[test]
    fn test_success_flag() {
        assert!(cleaned(json!({"data": {}})).success);
        assert!(!cleaned(json!({"success": false})).success);
        assert!(!cleaned(json!({"success": null})).success);
        assert!(!cleaned(json!({"success": 0})).success);
        assert!(cleaned(json!({"success": "yes"})).success);
    }

    #[test]
    fn test_non_string_fields_coerced() {
        let doc = cleaned(json!({
            "data": {
                "title": 42,
                "introduction": {"script": true},
                "mainContent": "not an object",
                "conclusion": {"script": ["a"]}
            }
        }));
        assert_eq!(doc.data.title, "42");
        assert_eq!(doc.data.introduction.script, "true");
        assert_eq!(doc.data.main_content.script, "");
        assert_eq!(doc.data.conclusion.script, r#"["a"]"#);
    }

    #[test]
    fn test_non_object_data_treated_as_empty() {
        let doc = cleaned(json!({"data": [1, 2]}));
        assert_eq!(doc.data, ScriptData::default());
    }

    #[test]
    fn test_extra_fields_dropped() {
        let value = serde_json::to_value(shape(&json!({
            "success": true,
            "extra": 1,
            "data": {"title": "T", "notes": "x", "introduction": {"script": "i", "cue": 3}}
        })))
        .unwrap();
        assert!(value.get("extra").is_none());
        assert!(value["data"].get("notes").is_none());
        assert!(value["data"]["introduction"].get("cue").is_none());
        assert_eq!(value["data"]["title"], "T");
    }
}
