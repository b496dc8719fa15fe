use serde::{Deserialize, Serialize};

use crate::surface::types::ElementRef;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Click,
    Fill,
}

impl ActionKind {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "click" => Some(ActionKind::Click),
            "fill" => Some(ActionKind::Fill),
            _ => None,
        }
    }

    pub fn verb(&self) -> &'static str {
        match self {
            ActionKind::Click => "Click",
            ActionKind::Fill => "Fill",
        }
    }
}

/// One instructed step. Ordinals are 1-based and contiguous within a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub ordinal: u32,
    pub kind: ActionKind,
    pub target_text: String,
}

impl Action {
    pub fn click(ordinal: u32, target: impl Into<String>) -> Self {
        Self {
            ordinal,
            kind: ActionKind::Click,
            target_text: target.into(),
        }
    }

    pub fn fill(ordinal: u32, target: impl Into<String>) -> Self {
        Self {
            ordinal,
            kind: ActionKind::Fill,
            target_text: target.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssistantReply {
    pub explanation: String,
    pub actions: Vec<Action>,
}

/// Where a step points on the live page. Never cached: the page may have
/// changed since the action list was produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResolvedTarget {
    Element {
        element: ElementRef,
        interaction: ActionKind,
    },
    /// Nothing matched; highlight the page root instead.
    Unresolved,
}

impl ResolvedTarget {
    pub fn anchor(&self) -> ElementRef {
        match self {
            ResolvedTarget::Element { element, .. } => element.clone(),
            ResolvedTarget::Unresolved => ElementRef::root(),
        }
    }
}
