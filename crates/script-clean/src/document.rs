//! Script document model
//!
//! The fixed-shape record produced by script generation: a title and three
//! named sections. Every shaped document carries all four text fields.

use serde::{Deserialize, Serialize};

use crate::Result;

/// One section of a script
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub script: String,
}

impl Section {
    pub fn new(script: impl Into<String>) -> Self {
        Self {
            script: script.into(),
        }
    }
}

/// Title and sections of a script
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptData {
    pub title: String,
    pub introduction: Section,
    #[serde(rename = "mainContent")]
    pub main_content: Section,
    pub conclusion: Section,
}

/// A complete script document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptDocument {
    pub success: bool,
    pub data: ScriptData,
}

impl ScriptDocument {
    pub fn new(success: bool, data: ScriptData) -> Self {
        Self { success, data }
    }

    /// Apply a transform to every text field, producing a new document
    pub fn map_text<F>(&self, mut f: F) -> Self
    where
        F: FnMut(&str) -> String,
    {
        Self {
            success: self.success,
            data: ScriptData {
                title: f(&self.data.title),
                introduction: Section::new(f(&self.data.introduction.script)),
                main_content: Section::new(f(&self.data.main_content.script)),
                conclusion: Section::new(f(&self.data.conclusion.script)),
            },
        }
    }
}

/// Report for input that is not a structured record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvalidPayload {
    pub success: bool,
    pub error: String,
}

impl InvalidPayload {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

/// Result of shaping a raw payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ShapedPayload {
    Cleaned(ScriptDocument),
    Invalid(InvalidPayload),
}

impl ShapedPayload {
    /// The `success` flag as it will be serialized
    pub fn is_success(&self) -> bool {
        match self {
            ShapedPayload::Cleaned(doc) => doc.success,
            ShapedPayload::Invalid(invalid) => invalid.success,
        }
    }

    /// The cleaned document, if the payload had a usable shape
    pub fn document(&self) -> Option<&ScriptDocument> {
        match self {
            ShapedPayload::Cleaned(doc) => Some(doc),
            ShapedPayload::Invalid(_) => None,
        }
    }

    /// Indented JSON (two spaces), non-ASCII characters written verbatim
    pub fn to_pretty_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Single-line JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl From<ScriptDocument> for ShapedPayload {
    fn from(doc: ScriptDocument) -> Self {
        ShapedPayload::Cleaned(doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn test_field_names_and_order() {
        let doc = ScriptDocument::new(
            true,
            ScriptData {
                title: "T".to_string(),
                introduction: Section::new("i"),
                main_content: Section::new("m"),
                conclusion: Section::new("c"),
            },
        );
        let json = ShapedPayload::from(doc).to_json().unwrap();
        assert_eq!(
            json,
            r#"{"success":true,"data":{"title":"T","introduction":{"script":"i"},"mainContent":{"script":"m"},"conclusion":{"script":"c"}}}"#
        );
    }

    #[test]
    fn test_invalid_serialization() {
        let payload = ShapedPayload::Invalid(InvalidPayload::new("Invalid payload type"));
        let value: Value = serde_json::from_str(&payload.to_json().unwrap()).unwrap();
        assert_eq!(value, json!({"success": false, "error": "Invalid payload type"}));
        assert!(!payload.is_success());
        assert!(payload.document().is_none());
    }

    #[test]
    fn test_pretty_json_keeps_unicode() {
        let doc = ScriptDocument::new(
            true,
            ScriptData {
                title: "Café ☕ 日本".to_string(),
                ..Default::default()
            },
        );
        let pretty = ShapedPayload::from(doc).to_pretty_json().unwrap();
        assert!(pretty.contains("Café ☕ 日本"));
        assert!(pretty.starts_with("{\n  \"success\": true,"));
    }

    #[test]
    fn test_map_text() {
        let doc = ScriptDocument::new(false, ScriptData::default());
        let mapped = doc.map_text(|_| "x".to_string());
        assert!(!mapped.success);
        assert_eq!(mapped.data.title, "x");
        assert_eq!(mapped.data.conclusion.script, "x");
    }
}
