//! Turns assistant output into an ordered action list.
//!
//! Structured replies (`{"explanation": ..., "steps": [...]}`) are taken as-is.
//! Anything else is treated as prose and scanned sentence by sentence for
//! "click"/"fill"/"enter" plus a quoted target. A sentence without a quoted
//! target produces nothing.

use std::sync::OnceLock;

use regex::Regex;
use serde::Deserialize;

use crate::guide::types::{Action, ActionKind, AssistantReply};

#[derive(Debug, Deserialize)]
struct StructuredReply {
    explanation: String,
    steps: Vec<StructuredStep>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StructuredStep {
    #[serde(default)]
    step: Option<u32>,
    #[serde(default)]
    action: Option<String>,
    #[serde(default)]
    target_text: Option<String>,
    #[serde(default)]
    target_label: Option<String>,
}

impl StructuredStep {
    fn target_for(&self, kind: ActionKind) -> Option<&str> {
        let (primary, secondary) = match kind {
            ActionKind::Click => (&self.target_text, &self.target_label),
            ActionKind::Fill => (&self.target_label, &self.target_text),
        };
        primary
            .as_deref()
            .or(secondary.as_deref())
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

fn quoted_span() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"["“]([^"“”]+)["”]"#).expect("quoted span regex"))
}

pub fn parse(raw: &str) -> AssistantReply {
    match serde_json::from_str::<StructuredReply>(strip_code_fence(raw.trim())) {
        Ok(reply) => from_structured(reply),
        Err(e) => {
            tracing::debug!(error = %e, "reply is not structured, using prose extraction");
            AssistantReply {
                explanation: raw.to_string(),
                actions: extract_from_prose(raw),
            }
        }
    }
}

/// Models like to wrap JSON in a ```json fence.
fn strip_code_fence(text: &str) -> &str {
    let Some(inner) = text.strip_prefix("```") else {
        return text;
    };
    let body = inner.split_once('\n').map(|(_, body)| body).unwrap_or(inner);
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

fn from_structured(reply: StructuredReply) -> AssistantReply {
    let mut actions = Vec::with_capacity(reply.steps.len());
    for (pos, step) in reply.steps.iter().enumerate() {
        let Some(kind) = step.action.as_deref().and_then(ActionKind::from_name) else {
            tracing::warn!(position = pos + 1, action = ?step.action, "dropping step with unknown action");
            continue;
        };
        let Some(target) = step.target_for(kind) else {
            tracing::warn!(position = pos + 1, "dropping step without a target");
            continue;
        };
        let ordinal = actions.len() as u32 + 1;
        if step.step.is_some_and(|declared| declared != ordinal) {
            tracing::debug!(declared = ?step.step, ordinal, "renumbering structured step");
        }
        actions.push(Action {
            ordinal,
            kind,
            target_text: target.to_string(),
        });
    }
    tracing::info!(actions = actions.len(), "structured reply parsed");
    AssistantReply {
        explanation: reply.explanation,
        actions,
    }
}

/// Best-effort extraction from free text.
pub fn extract_from_prose(text: &str) -> Vec<Action> {
    let mut actions: Vec<Action> = Vec::new();
    for sentence in text.split('.').map(str::trim).filter(|s| !s.is_empty()) {
        let lower = sentence.to_lowercase();
        let target = first_quoted(sentence);

        if lower.contains("click") {
            if let Some(t) = target {
                actions.push(Action::click(actions.len() as u32 + 1, t));
            }
        }
        if lower.contains("fill") || lower.contains("enter") {
            if let Some(t) = target {
                actions.push(Action::fill(actions.len() as u32 + 1, t));
            }
        }
    }
    tracing::debug!(actions = actions.len(), "prose extraction finished");
    actions
}

fn first_quoted(sentence: &str) -> Option<&str> {
    quoted_span()
        .captures(sentence)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
        .filter(|t| !t.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structured_reply_keeps_order_and_numbers_by_position() {
        let raw = r#"{
            "explanation": "Create a user.",
            "steps": [
                { "step": 1, "action": "click", "targetText": "Users" },
                { "step": 2, "action": "fill", "targetLabel": "Name" },
                { "step": 7, "action": "Click", "targetText": "Save" }
            ]
        }"#;
        let reply = parse(raw);
        assert_eq!(reply.explanation, "Create a user.");
        assert_eq!(
            reply.actions,
            vec![
                Action::click(1, "Users"),
                Action::fill(2, "Name"),
                Action::click(3, "Save"),
            ]
        );
    }

    #[test]
    fn fenced_json_is_still_structured() {
        let raw = "```json\n{\"explanation\": \"Go.\", \"steps\": [{\"step\": 1, \"action\": \"click\", \"targetText\": \"Go\"}]}\n```";
        let reply = parse(raw);
        assert_eq!(reply.explanation, "Go.");
        assert_eq!(reply.actions, vec![Action::click(1, "Go")]);
    }

    #[test]
    fn structured_steps_without_usable_fields_are_dropped() {
        let raw = r#"{
            "explanation": "x",
            "steps": [
                { "step": 1, "action": "hover", "targetText": "Menu" },
                { "step": 2, "action": "click", "targetText": "  " },
                { "step": 3, "action": "fill", "targetText": "Email" }
            ]
        }"#;
        assert_eq!(parse(raw).actions, vec![Action::fill(1, "Email")]);
    }

    #[test]
    fn prose_click_then_fill() {
        let reply = parse("Click the \"Submit\" button. Then fill \"Email\".");
        assert_eq!(
            reply.actions,
            vec![Action::click(1, "Submit"), Action::fill(2, "Email")]
        );
        assert_eq!(reply.explanation, "Click the \"Submit\" button. Then fill \"Email\".");
    }

    #[test]
    fn click_without_quoted_target_is_dropped() {
        assert!(parse("Click somewhere.").actions.is_empty());
        assert_eq!(
            parse("Click somewhere. Click \"Next\".").actions,
            vec![Action::click(1, "Next")]
        );
    }

    #[test]
    fn one_sentence_can_emit_click_and_fill() {
        let actions = extract_from_prose("Click \"Name\" and enter your full name");
        assert_eq!(actions, vec![Action::click(1, "Name"), Action::fill(2, "Name")]);
    }

    #[test]
    fn enter_is_a_fill_trigger_and_curly_quotes_work() {
        let actions = extract_from_prose("Enter your address in “Street”.");
        assert_eq!(actions, vec![Action::fill(1, "Street")]);
    }

    #[test]
    fn quoted_span_is_kept_as_written() {
        let actions = extract_from_prose("Click \" Save \". Click \"  \".");
        assert_eq!(actions, vec![Action::click(1, " Save ")]);
    }

    #[test]
    fn malformed_json_falls_back_to_prose() {
        let reply = parse("{not json");
        assert_eq!(reply.explanation, "{not json");
        assert!(reply.actions.is_empty());

        let missing_steps = parse(r#"{"explanation": "hi"}"#);
        assert_eq!(missing_steps.explanation, r#"{"explanation": "hi"}"#);
        assert!(missing_steps.actions.is_empty());
    }
}
