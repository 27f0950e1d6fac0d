use super::LlmClient;
use crate::config::{ProviderKind, ServiceConfig};
use crate::model::{ChatMessage, LlmResponse};
use async_trait::async_trait;
use serde_json::json;

pub const OPENAI_CHAT_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Reviews are graded deterministically.
pub const REVIEW_TEMPERATURE: f32 = 0.0;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Endpoint {
    OpenAi { url: String },
    Azure { url: String },
}

/// Chat-completions client for OpenAI and Azure OpenAI deployments.
pub struct OpenAIClient {
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    api_key: String,
    endpoint: Endpoint,
    client: reqwest::Client,
}

impl OpenAIClient {
    pub fn new(cfg: &ServiceConfig) -> Self {
        let endpoint = match cfg.provider {
            ProviderKind::Azure => Endpoint::Azure {
                url: format!(
                    "{}/openai/deployments/{}/chat/completions?api-version={}",
                    cfg.endpoint.as_deref().unwrap_or_default().trim_end_matches('/'),
                    cfg.model,
                    cfg.api_version
                ),
            },
            _ => Endpoint::OpenAi {
                url: cfg
                    .endpoint
                    .clone()
                    .unwrap_or_else(|| OPENAI_CHAT_URL.to_string()),
            },
        };
        Self {
            model: cfg.model.clone(),
            max_tokens: cfg.max_tokens,
            temperature: REVIEW_TEMPERATURE,
            api_key: cfg.api_key.clone().unwrap_or_default(),
            endpoint,
            client: reqwest::Client::new(),
        }
    }

    pub fn url(&self) -> &str {
        match &self.endpoint {
            Endpoint::OpenAi { url } | Endpoint::Azure { url } => url,
        }
    }

    pub(crate) fn request_body(&self, messages: &[ChatMessage]) -> serde_json::Value {
        let mut body = json!({
            "messages": messages,
            "temperature": self.temperature,
            "max_tokens": self.max_tokens,
        });
        // Azure routes by deployment in the URL.
        if matches!(self.endpoint, Endpoint::OpenAi { .. }) {
            body["model"] = json!(self.model);
        }
        body
    }
}

#[async_trait]
impl LlmClient for OpenAIClient {
    async fn complete(&self, messages: &[ChatMessage]) -> anyhow::Result<LlmResponse> {
        let url = self.url();
        let request = self.client.post(url).json(&self.request_body(messages));
        let request = match self.endpoint {
            Endpoint::OpenAi { .. } => request.bearer_auth(&self.api_key),
            Endpoint::Azure { .. } => request.header("api-key", &self.api_key),
        };

        let resp = request.send().await?;
        let status = resp.status();
        if !status.is_success() {
            let error_text = resp.text().await.unwrap_or_default();
            anyhow::bail!(
                "{} chat API error (status {}): {}",
                self.provider_name(),
                status.as_u16(),
                error_text
            );
        }

        let json: serde_json::Value = resp.json().await?;
        let text = json
            .pointer("/choices/0/message/content")
            .and_then(|v| v.as_str())
            .ok_or_else(|| anyhow::anyhow!("{} API response missing content", self.provider_name()))?
            .to_string();

        Ok(LlmResponse {
            text,
            provider: self.provider_name().to_string(),
            model: self.model.clone(),
            meta: json.get("usage").cloned().unwrap_or(serde_json::Value::Null),
        })
    }

    fn provider_name(&self) -> &'static str {
        match self.endpoint {
            Endpoint::OpenAi { .. } => "openai",
            Endpoint::Azure { .. } => "azure",
        }
    }
}
