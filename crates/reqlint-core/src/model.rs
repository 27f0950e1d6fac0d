use serde::{Deserialize, Deserializer, Serialize};

/// Label used for text that precedes the first detected heading.
pub const UNCLASSIFIED: &str = "unclassified";

/// A label-tagged slice of the document; the scope of one evaluation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    /// Position of first appearance in the document.
    pub id: usize,
    pub label: String,
    pub content: String,
}

impl Chapter {
    pub fn is_blank(&self) -> bool {
        self.content.trim().is_empty()
    }

    /// Text handed to the prompt builder: chapter context followed by content.
    pub fn unit_text(&self) -> String {
        format!("Chapter: {}\nContent:\n{}", self.label, self.content)
    }
}

/// One sentence judged by the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EvaluationItem {
    #[serde(deserialize_with = "null_as_default")]
    pub original_sentence: String,
    #[serde(deserialize_with = "null_as_default")]
    pub has_issue: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub reason: String,
    #[serde(deserialize_with = "null_as_default")]
    pub suggestion: String,
}

/// Reads `null` as the field's default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl EvaluationItem {
    /// Clean items carry no reason or suggestion.
    pub(crate) fn normalized(mut self) -> Self {
        if !self.has_issue {
            self.reason.clear();
            self.suggestion.clear();
        }
        self
    }
}

/// Result of one evaluation attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum EvaluationOutcome {
    Success { items: Vec<EvaluationItem> },
    Failure { raw_response: String, error: String },
}

/// A response the aggregator could not turn into evaluation items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseErrorEntry {
    pub response: String,
    pub error: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmResponse {
    pub text: String,
    pub provider: String,
    pub model: String,
    #[serde(default)]
    pub meta: serde_json::Value,
}
