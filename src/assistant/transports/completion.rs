use async_trait::async_trait;

use crate::assistant::prompt::{build_user_prompt, SYSTEM_PROMPT};
use crate::assistant::transport::AssistantTransport;
use crate::assistant::types::{AssistantRequest, CompletionMessage};
use crate::errors::{GuideError, GuideResult};

/// Talks to an OpenAI-compatible `chat/completions` endpoint directly,
/// building the prompt locally instead of relying on a proxy.
pub struct CompletionTransport {
    api_base: String,
    api_key: String,
    model: String,
    temperature: f64,
    client: reqwest::Client,
}

impl CompletionTransport {
    pub fn new(api_base: String, api_key: String, model: String, temperature: f64) -> Self {
        Self {
            api_base,
            api_key,
            model,
            temperature,
            client: reqwest::Client::new(),
        }
    }

    fn request_body(&self, request: &AssistantRequest) -> serde_json::Value {
        let messages = vec![
            CompletionMessage::system(SYSTEM_PROMPT),
            CompletionMessage::user(build_user_prompt(
                &request.user_message,
                &request.ui_metadata,
            )),
        ];
        serde_json::json!({
            "model": self.model,
            "messages": messages,
            "stream": false,
            "temperature": self.temperature,
        })
    }
}

#[async_trait]
impl AssistantTransport for CompletionTransport {
    fn name(&self) -> &str {
        "completion"
    }

    async fn send(&self, request: &AssistantRequest) -> GuideResult<String> {
        let body = self.request_body(request);
        tracing::debug!(model = %self.model, api_base = %self.api_base, "sending completion request");

        let response = self
            .client
            .post(&self.api_base)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let err_body = response.text().await.unwrap_or_default();
            return Err(GuideError::Transport(format!("{}: {}", status, err_body)));
        }

        let json: serde_json::Value = response.json().await?;
        let content = completion_content(&json)?;
        tracing::info!(content_len = content.len(), "completion received");
        Ok(content)
    }
}

fn completion_content(json: &serde_json::Value) -> GuideResult<String> {
    json["choices"][0]["message"]["content"]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| GuideError::Transport("completion response has no message content".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::types::UiSnapshot;

    #[test]
    fn body_has_system_and_user_turns() {
        let transport = CompletionTransport::new(
            "https://api.example.com/v1/chat/completions".into(),
            "key".into(),
            "gpt-4o-mini".into(),
            0.2,
        );
        let request = AssistantRequest {
            user_message: "Where are invoices?".into(),
            ui_metadata: UiSnapshot {
                route: "/".into(),
                page_title: "Home".into(),
                table_headers: vec![],
                form_labels: vec![],
                text_buttons: vec!["Invoices".into()],
                icon_buttons: vec![],
            },
        };
        let body = transport.request_body(&request);
        assert_eq!(body["model"], "gpt-4o-mini");
        assert_eq!(body["stream"], false);
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][0]["content"], SYSTEM_PROMPT);
        let user = body["messages"][1]["content"].as_str().unwrap();
        assert!(user.contains("Visible buttons: Invoices."));
        assert!(user.contains("Where are invoices?"));
    }

    #[test]
    fn content_is_read_from_first_choice() {
        let json = serde_json::json!({
            "choices": [{ "message": { "role": "assistant", "content": "Click \"Invoices\"." } }]
        });
        assert_eq!(completion_content(&json).unwrap(), "Click \"Invoices\".");
        assert!(completion_content(&serde_json::json!({ "choices": [] })).is_err());
    }
}
