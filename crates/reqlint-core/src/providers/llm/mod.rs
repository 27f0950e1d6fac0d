pub mod fake;
pub mod openai;

use crate::config::{NetworkPolicy, ProviderKind, ServiceConfig};
use crate::errors::ReviewError;
use crate::model::{ChatMessage, LlmResponse};
use async_trait::async_trait;
use std::sync::Arc;

/// Opaque text-completion endpoint.
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn complete(&self, messages: &[ChatMessage]) -> anyhow::Result<LlmResponse>;

    fn provider_name(&self) -> &'static str;
}

/// Builds the client for the configured provider.
///
/// Under a `deny` network policy only the offline provider is built; a
/// networked provider is refused with the endpoint it would have called.
pub fn build_client(cfg: &ServiceConfig) -> Result<Arc<dyn LlmClient>, ReviewError> {
    match cfg.provider {
        ProviderKind::Fake => Ok(Arc::new(fake::FakeLlmClient::default())),
        ProviderKind::OpenAi | ProviderKind::Azure => {
            let client = openai::OpenAIClient::new(cfg);
            if cfg.network == NetworkPolicy::Deny {
                return Err(ReviewError::NetworkDenied {
                    provider: client.provider_name(),
                    target: client.url().to_string(),
                });
            }
            tracing::debug!(provider = client.provider_name(), url = client.url(), "built model client");
            Ok(Arc::new(client))
        }
    }
}
