use async_trait::async_trait;

use crate::assistant::types::AssistantRequest;
use crate::errors::GuideResult;

/// Carries a user question plus the page snapshot to the remote assistant
/// and returns its reply text, unparsed.
#[async_trait]
pub trait AssistantTransport: Send + Sync {
    /// Identifier used in logs.
    fn name(&self) -> &str;

    async fn send(&self, request: &AssistantRequest) -> GuideResult<String>;
}
