//! Decoding of raw model replies.
//!
//! Models are asked for bare JSON but frequently wrap it in a Markdown
//! fence. When the reply cannot be decoded at all, callers fall back to a
//! deterministic template document built from the original request.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::document::{ScriptData, ScriptDocument, Section};
use crate::{CleanError, Result};

const FENCE: &str = "```";

/// Parameters of a script generation request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptRequest {
    pub topic: String,
    #[serde(default = "ScriptRequest::default_platform")]
    pub platform: String,
    #[serde(default = "ScriptRequest::default_tone")]
    pub tone: String,
    #[serde(default = "ScriptRequest::default_length")]
    pub length: String,
}

impl ScriptRequest {
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            platform: Self::default_platform(),
            tone: Self::default_tone(),
            length: Self::default_length(),
        }
    }

    fn default_platform() -> String {
        "YouTube".to_string()
    }

    fn default_tone() -> String {
        "Casual".to_string()
    }

    fn default_length() -> String {
        "Short (2-3 min)".to_string()
    }
}

/// Decode a model reply into JSON, unwrapping a leading ```` ```json ```` fence.
pub fn decode_reply(content: &str) -> Result<Value> {
    let mut text = content.trim();

    if text.starts_with(FENCE) {
        text = text.split(FENCE).nth(1).unwrap_or_default();
        text = text.strip_prefix("json").unwrap_or(text).trim();
    }

    if text.is_empty() {
        return Err(CleanError::InvalidInput("model reply is empty".to_string()));
    }

    Ok(serde_json::from_str(text)?)
}

/// Wrap decoded script data in the payload shape the shaper expects
pub fn generation_payload(script: Value) -> Value {
    json!({ "success": true, "data": script })
}

/// Template document used when a reply cannot be decoded
pub fn fallback_document(request: &ScriptRequest) -> ScriptDocument {
    let topic = &request.topic;
    let tone = request.tone.to_uppercase();

    ScriptDocument::new(
        true,
        ScriptData {
            title: format!("{topic} - Script for {}", request.platform),
            introduction: Section::new(format!(
                "[{tone}] Hook your audience with a strong intro\n\n\
                 Hello everyone! Today we're diving deep into {topic}. This is something \
                 I'm really passionate about, and I can't wait to share my insights with you."
            )),
            main_content: Section::new(format!(
                "[MAIN CONTENT - {tone} TONE]\n\n\
                 Let's talk about the three most important aspects of {topic}:\n\n\
                 1. The fundamentals that everyone should know\n\
                 2. Common misconceptions that might be holding you back\n\
                 3. Advanced strategies that can take your understanding to the next level"
            )),
            conclusion: Section::new(format!(
                "[CONCLUSION - {tone}]\n\n\
                 Thanks for staying with me through this exploration of {topic}. If you found \
                 this valuable, make sure to like and subscribe for more content like this!"
            )),
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_json() {
        let value = decode_reply(r#" {"title": "T"} "#).unwrap();
        assert_eq!(value, json!({"title": "T"}));
    }

    #[test]
    fn test_fenced_json() {
        let reply = "```json\n{\"title\": \"T\", \"introduction\": {\"script\": \"hi\"}}\n```";
        let value = decode_reply(reply).unwrap();
        assert_eq!(value["introduction"]["script"], "hi");
    }

    #[test]
    fn test_fence_without_language() {
        let value = decode_reply("```\n[1, 2]\n```").unwrap();
        assert_eq!(value, json!([1, 2]));
    }

    #[test]
    fn test_invalid_reply() {
        assert!(matches!(
            decode_reply("Sure! Here is your script."),
            Err(CleanError::Json(_))
        ));
        assert!(matches!(decode_reply("   "), Err(CleanError::InvalidInput(_))));
        assert!(matches!(decode_reply("```"), Err(CleanError::InvalidInput(_))));
    }

    #[test]
    fn test_generation_payload() {
        let payload = generation_payload(json!({"title": "T"}));
        assert_eq!(payload, json!({"success": true, "data": {"title": "T"}}));
    }

    #[test]
    fn test_request_defaults() {
        let request: ScriptRequest = serde_json::from_value(json!({"topic": "Rust"})).unwrap();
        assert_eq!(request, ScriptRequest::new("Rust"));
        assert_eq!(request.platform, "YouTube");
        assert_eq!(request.length, "Short (2-3 min)");
    }

    #[test]
    fn test_fallback_document() {
        let mut request = ScriptRequest::new("Sourdough");
        request.platform = "TikTok".to_string();
        request.tone = "Funny".to_string();

        let doc = fallback_document(&request);
        assert!(doc.success);
        assert_eq!(doc.data.title, "Sourdough - Script for TikTok");
        assert!(doc.data.introduction.script.starts_with("[FUNNY] Hook"));
        assert!(doc.data.main_content.script.contains("2. Common misconceptions"));
        assert!(doc.data.conclusion.script.contains("exploration of Sourdough"));
    }
}
