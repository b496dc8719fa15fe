use serde::{Deserialize, Serialize};

use crate::surface::types::UiSnapshot;

/// Body sent to the assistant proxy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssistantRequest {
    pub user_message: String,
    pub ui_metadata: UiSnapshot,
}

/// OpenAI-compatible chat message, used by the completion transport.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionMessage {
    pub role: String,
    pub content: String,
}

impl CompletionMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".into(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".into(),
            content: content.into(),
        }
    }
}

/// Reply text from a proxy response body: `raw`, then `message`, then the
/// body itself.
pub fn reply_text(body: &serde_json::Value) -> String {
    for key in ["raw", "message"] {
        match body.get(key) {
            Some(serde_json::Value::String(s)) if !s.is_empty() => return s.clone(),
            Some(serde_json::Value::Null) | None => {}
            Some(serde_json::Value::String(_)) => {}
            Some(other) => return other.to_string(),
        }
    }
    match body {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn raw_takes_precedence_over_message() {
        assert_eq!(reply_text(&json!({ "raw": "a", "message": "b" })), "a");
        assert_eq!(reply_text(&json!({ "raw": "", "message": "b" })), "b");
        assert_eq!(reply_text(&json!({ "message": "b" })), "b");
    }

    #[test]
    fn falls_back_to_whole_body() {
        assert_eq!(reply_text(&json!("plain text")), "plain text");
        assert_eq!(reply_text(&json!({ "other": 1 })), r#"{"other":1}"#);
    }

    #[test]
    fn structured_raw_is_passed_through_as_text() {
        let body = json!({ "raw": { "explanation": "x", "steps": [] } });
        let text = reply_text(&body);
        let back: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(back["explanation"], "x");
    }

    #[test]
    fn request_uses_wire_field_names() {
        let req = AssistantRequest {
            user_message: "how do I add a user?".into(),
            ui_metadata: UiSnapshot {
                route: "/".into(),
                page_title: "Home".into(),
                table_headers: vec![],
                form_labels: vec![],
                text_buttons: vec![],
                icon_buttons: vec![],
            },
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["userMessage"], "how do I add a user?");
        assert_eq!(value["uiMetadata"]["pageTitle"], "Home");
        assert_eq!(value["uiMetadata"]["currentPath"], "/");
    }
}
