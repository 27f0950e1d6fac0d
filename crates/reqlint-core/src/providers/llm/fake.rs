use super::LlmClient;
use crate::model::{ChatMessage, LlmResponse};
use async_trait::async_trait;

/// Offline client that answers every request with the same text.
pub struct FakeLlmClient {
    response: String,
}

impl FakeLlmClient {
    pub fn with_response(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
        }
    }
}

impl Default for FakeLlmClient {
    fn default() -> Self {
        Self::with_response(r#"{"evaluations": []}"#)
    }
}

#[async_trait]
impl LlmClient for FakeLlmClient {
    async fn complete(&self, _messages: &[ChatMessage]) -> anyhow::Result<LlmResponse> {
        Ok(LlmResponse {
            text: self.response.clone(),
            provider: "fake".to_string(),
            model: "fake".to_string(),
            meta: serde_json::Value::Null,
        })
    }

    fn provider_name(&self) -> &'static str {
        "fake"
    }
}
