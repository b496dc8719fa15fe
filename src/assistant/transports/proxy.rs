use async_trait::async_trait;

use crate::assistant::transport::AssistantTransport;
use crate::assistant::types::{reply_text, AssistantRequest};
use crate::errors::{GuideError, GuideResult};

/// Posts `{userMessage, uiMetadata}` to an assistant proxy endpoint.
pub struct ProxyTransport {
    endpoint: String,
    client: reqwest::Client,
}

impl ProxyTransport {
    pub fn new(endpoint: String) -> Self {
        Self {
            endpoint,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl AssistantTransport for ProxyTransport {
    fn name(&self) -> &str {
        "proxy"
    }

    async fn send(&self, request: &AssistantRequest) -> GuideResult<String> {
        tracing::debug!(
            endpoint = %self.endpoint,
            route = %request.ui_metadata.route,
            message_len = request.user_message.len(),
            "posting to assistant proxy"
        );

        let response = self.client.post(&self.endpoint).json(request).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let err_body = response.text().await.unwrap_or_default();
            return Err(GuideError::Transport(format!("{}: {}", status, err_body)));
        }

        // Non-JSON bodies are taken as the reply text itself.
        let text = response.text().await?;
        let reply = match serde_json::from_str::<serde_json::Value>(&text) {
            Ok(body) => reply_text(&body),
            Err(_) => text,
        };
        tracing::info!(reply_len = reply.len(), "assistant proxy replied");
        Ok(reply)
    }
}
