use super::json_span::first_json_object;
use super::prompt::PromptPair;
use crate::providers::llm::LlmClient;
use serde_json::json;
use std::sync::Arc;
use std::time::Instant;

/// Error-shaped payload understood by the aggregator.
pub fn error_payload(error: &str, raw_response: Option<&str>) -> String {
    let mut v = json!({ "error": error });
    if let Some(raw) = raw_response {
        v["raw_response"] = json!(raw);
    }
    v.to_string()
}

/// Sends prompts to the model service. One attempt per prompt, no retries.
#[derive(Clone)]
pub struct EvaluationClient {
    llm: Arc<dyn LlmClient>,
}

impl EvaluationClient {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm }
    }

    pub fn provider_name(&self) -> &'static str {
        self.llm.provider_name()
    }

    /// Returns the first JSON object of the model's answer, or an error
    /// payload when the call fails or the answer contains no object.
    pub async fn evaluate(&self, prompt: &PromptPair) -> String {
        let started = Instant::now();
        let result = self.llm.complete(&prompt.messages()).await;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        match result {
            Ok(resp) => match first_json_object(&resp.text) {
                Some(span) => {
                    tracing::debug!(
                        provider = %resp.provider,
                        model = %resp.model,
                        usage = %resp.meta,
                        elapsed_ms,
                        "evaluation ok"
                    );
                    span.to_string()
                }
                None => {
                    tracing::warn!(
                        provider = %resp.provider,
                        model = %resp.model,
                        elapsed_ms,
                        "model response contains no JSON object"
                    );
                    error_payload("no JSON object found in model response", Some(&resp.text))
                }
            },
            Err(e) => {
                tracing::warn!(
                    provider = self.provider_name(),
                    elapsed_ms,
                    error = %e,
                    "model service call failed"
                );
                error_payload(&format!("model service call failed: {e:#}"), None)
            }
        }
    }
}
