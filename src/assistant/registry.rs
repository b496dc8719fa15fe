use std::sync::Arc;

use crate::assistant::transport::AssistantTransport;
use crate::assistant::transports::completion::CompletionTransport;
use crate::assistant::transports::proxy::ProxyTransport;
use crate::config::{AssistantConfig, TransportKind};

/// Builds the transport selected in `[assistant]`.
pub fn transport_from_config(cfg: &AssistantConfig) -> Arc<dyn AssistantTransport> {
    match cfg.transport {
        TransportKind::Proxy => {
            tracing::info!(endpoint = %cfg.endpoint, "using assistant proxy transport");
            Arc::new(ProxyTransport::new(cfg.endpoint.clone()))
        }
        TransportKind::Completion => {
            let api_key = cfg.resolved_api_key();
            if api_key.is_empty() {
                tracing::warn!("completion transport configured without an API key");
            }
            tracing::info!(endpoint = %cfg.endpoint, model = %cfg.model, "using completion transport");
            Arc::new(CompletionTransport::new(
                cfg.endpoint.clone(),
                api_key,
                cfg.model.clone(),
                cfg.temperature,
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_transport_by_kind() {
        let mut cfg = AssistantConfig::default();
        assert_eq!(transport_from_config(&cfg).name(), "proxy");
        cfg.transport = TransportKind::Completion;
        assert_eq!(transport_from_config(&cfg).name(), "completion");
    }
}
