use serde::{Deserialize, Serialize};

use crate::guide::types::Action;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub ts: i64,
    pub role: Role,
    pub text: String,
    #[serde(default)]
    pub actions: Vec<Action>,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            ts: chrono::Utc::now().timestamp_millis(),
            role: Role::User,
            text: text.into(),
            actions: Vec::new(),
        }
    }

    pub fn assistant(text: impl Into<String>, actions: Vec<Action>) -> Self {
        Self {
            ts: chrono::Utc::now().timestamp_millis(),
            role: Role::Assistant,
            text: text.into(),
            actions,
        }
    }

    /// Whether a "Show Visual Demo" control belongs next to this message.
    pub fn has_demo(&self) -> bool {
        self.role == Role::Assistant && !self.actions.is_empty()
    }
}

/// Append-only, in-memory conversation log. Gone when the session ends.
pub struct MessageLog {
    pub session_id: String,
    entries: Vec<ChatMessage>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self {
            session_id: uuid::Uuid::new_v4().to_string(),
            entries: Vec::new(),
        }
    }

    pub fn push(&mut self, message: ChatMessage) {
        tracing::debug!(
            session = %self.session_id,
            role = ?message.role,
            actions = message.actions.len(),
            "message appended"
        );
        self.entries.push(message);
    }

    pub fn entries(&self) -> &[ChatMessage] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&ChatMessage> {
        self.entries.get(index)
    }
}

impl Default for MessageLog {
    fn default() -> Self {
        Self::new()
    }
}
