pub mod console;
pub mod json;
pub mod markdown;
pub mod progress;

use crate::model::{EvaluationItem, EvaluationOutcome, ParseErrorEntry};
use crate::review::prompt::EVALUATIONS_KEY;
use serde::Serialize;
use serde_json::Value;

/// Shown instead of an empty issues table.
pub const NO_ISSUES_FOUND: &str = "No issues found.";

pub const ISSUES_TABLE_HEADER: &str = "| Original | Reason | Suggestion |\n|----------|--------|------------|";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregatedReport {
    pub issues_table: String,
    pub all_items: Vec<EvaluationItem>,
    pub parse_errors: Vec<ParseErrorEntry>,
}

impl AggregatedReport {
    pub fn issues(&self) -> impl Iterator<Item = &EvaluationItem> {
        self.all_items.iter().filter(|i| i.has_issue)
    }

    pub fn issue_count(&self) -> usize {
        self.issues().count()
    }

    pub fn item_count(&self) -> usize {
        self.all_items.len()
    }

    pub fn has_issues(&self) -> bool {
        self.issues().next().is_some()
    }
}

/// Makes a value safe inside one markdown table cell.
pub fn escape_cell(s: &str) -> String {
    s.trim()
        .replace('|', "\\|")
        .replace("\r\n", "<br>")
        .replace('\n', "<br>")
}

pub(crate) fn issue_row(item: &EvaluationItem) -> String {
    format!(
        "| {} | {} | {} |",
        escape_cell(&item.original_sentence),
        escape_cell(&item.reason),
        escape_cell(&item.suggestion)
    )
}

fn failure(response: &str, error: impl Into<String>) -> EvaluationOutcome {
    EvaluationOutcome::Failure {
        raw_response: response.to_string(),
        error: error.into(),
    }
}

/// Classifies one raw response as evaluation items or a failure.
pub fn parse_outcome(raw: &str) -> EvaluationOutcome {
    let value: Value = match serde_json::from_str(raw) {
        Ok(v) => v,
        Err(e) => return failure(raw, format!("invalid JSON: {e}")),
    };
    let Some(obj) = value.as_object() else {
        return failure(raw, "response is not a JSON object");
    };

    if let Some(err) = obj.get("error") {
        let error = match err {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        let response = obj
            .get("raw_response")
            .and_then(Value::as_str)
            .unwrap_or(raw);
        return failure(response, error);
    }

    let items = match obj.get(EVALUATIONS_KEY) {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(entries)) => {
            let mut items = Vec::with_capacity(entries.len());
            for (idx, entry) in entries.iter().enumerate() {
                match serde_json::from_value::<EvaluationItem>(entry.clone()) {
                    Ok(item) => items.push(item.normalized()),
                    Err(e) => {
                        return failure(raw, format!("invalid evaluation at index {idx}: {e}"))
                    }
                }
            }
            items
        }
        Some(other) => {
            return failure(
                raw,
                format!("'{EVALUATIONS_KEY}' must be an array, got {}", json_kind(other)),
            )
        }
    };
    EvaluationOutcome::Success { items }
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Folds raw responses, in request order, into a report. A malformed
/// response is recorded and skipped; it never aborts the rest.
pub fn aggregate<S: AsRef<str>>(raw_responses: &[S]) -> AggregatedReport {
    let mut rows = Vec::new();
    let mut all_items = Vec::new();
    let mut parse_errors = Vec::new();

    for raw in raw_responses {
        match parse_outcome(raw.as_ref()) {
            EvaluationOutcome::Success { items } => {
                for item in items {
                    if item.has_issue {
                        rows.push(issue_row(&item));
                    }
                    all_items.push(item);
                }
            }
            EvaluationOutcome::Failure {
                raw_response,
                error,
            } => {
                tracing::warn!(%error, "recorded unparseable evaluation response");
                parse_errors.push(ParseErrorEntry {
                    response: raw_response,
                    error,
                });
            }
        }
    }

    let issues_table = if rows.is_empty() {
        NO_ISSUES_FOUND.to_string()
    } else {
        format!("{}\n{}", ISSUES_TABLE_HEADER, rows.join("\n"))
    };

    AggregatedReport {
        issues_table,
        all_items,
        parse_errors,
    }
}
