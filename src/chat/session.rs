use std::sync::Arc;

use crate::assistant::registry::transport_from_config;
use crate::assistant::transport::AssistantTransport;
use crate::assistant::types::AssistantRequest;
use crate::chat::history::{ChatMessage, MessageLog};
use crate::config::AppConfig;
use crate::errors::{GuideError, GuideResult};
use crate::guide::parser;
use crate::surface::snapshot::SnapshotExtractor;
use crate::surface::traits::UiSurface;
use crate::tour::session::TourSession;
use crate::tour::state::TourStep;

pub const TRANSPORT_ERROR_TEXT: &str = "Error contacting server.";

/// Ties the pieces together: message log, snapshot, assistant call, parsing
/// and the tour.
///
/// One request is in flight at a time by construction: `send` borrows the
/// session mutably until the reply is in.
pub struct ChatSession {
    log: MessageLog,
    transport: Arc<dyn AssistantTransport>,
    extractor: SnapshotExtractor,
    tour: TourSession,
}

impl ChatSession {
    pub fn new(
        transport: Arc<dyn AssistantTransport>,
        extractor: SnapshotExtractor,
        tour: TourSession,
    ) -> Self {
        Self {
            log: MessageLog::new(),
            transport,
            extractor,
            tour,
        }
    }

    pub fn from_config(cfg: &AppConfig) -> Self {
        Self::new(
            transport_from_config(&cfg.assistant),
            SnapshotExtractor::from_config(&cfg.snapshot),
            TourSession::new(cfg.tour.deferral),
        )
    }

    pub fn session_id(&self) -> &str {
        &self.log.session_id
    }

    pub fn messages(&self) -> &[ChatMessage] {
        self.log.entries()
    }

    pub fn tour(&self) -> &TourSession {
        &self.tour
    }

    pub fn tour_mut(&mut self) -> &mut TourSession {
        &mut self.tour
    }

    /// Sends a user message with a fresh snapshot of `surface` and appends
    /// the assistant's reply. Blank input is ignored and yields `None`.
    pub async fn send(&mut self, input: &str, surface: &dyn UiSurface) -> Option<&ChatMessage> {
        let text = input.trim();
        if text.is_empty() {
            return None;
        }
        self.log.push(ChatMessage::user(text));

        let request = AssistantRequest {
            user_message: text.to_string(),
            ui_metadata: self.extractor.capture(surface),
        };

        let reply = match self.transport.send(&request).await {
            Ok(raw) => {
                let reply = parser::parse(&raw);
                tracing::info!(
                    transport = self.transport.name(),
                    actions = reply.actions.len(),
                    "assistant reply parsed"
                );
                ChatMessage::assistant(reply.explanation, reply.actions)
            }
            Err(e) => {
                tracing::error!(transport = self.transport.name(), error = %e, "assistant call failed");
                ChatMessage::assistant(TRANSPORT_ERROR_TEXT, Vec::new())
            }
        };
        self.log.push(reply);
        self.log.entries().last()
    }

    /// Starts the visual walkthrough for the assistant message at `index`.
    pub fn show_visual_demo(
        &mut self,
        index: usize,
        surface: &dyn UiSurface,
    ) -> GuideResult<&[TourStep]> {
        let message = self
            .log
            .get(index)
            .ok_or_else(|| GuideError::Session(format!("no message at index {index}")))?;
        if !message.has_demo() {
            return Err(GuideError::Session(format!(
                "message {index} has no steps to demonstrate"
            )));
        }
        let actions = message.actions.clone();
        self.tour.start(&actions, surface);
        Ok(self.tour.steps())
    }
}
