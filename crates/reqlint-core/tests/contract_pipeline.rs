//! End-to-end contract: segment -> prompt -> evaluate -> aggregate with a
//! stubbed model service.

use async_trait::async_trait;
use reqlint_core::engine::ReviewRunner;
use reqlint_core::model::{ChatMessage, LlmResponse};
use reqlint_core::providers::llm::LlmClient;
use reqlint_core::report::NO_ISSUES_FOUND;
use reqlint_core::review::EvaluationClient;
use reqlint_core::{EvaluationRule, RuleSet};
use std::sync::{Arc, Mutex};

const DOCUMENT: &str = "1 Intro\nThe door must be opened by the user.\n2 Safety\nThe system shall always respond appropriately.\n";

/// Flags the one requirement sentence of each chapter, wrapping the JSON in
/// prose the way chat models often do.
struct StubService {
    prompts: Mutex<Vec<String>>,
}

#[async_trait]
impl LlmClient for StubService {
    async fn complete(&self, messages: &[ChatMessage]) -> anyhow::Result<LlmResponse> {
        let user = messages[1].content.clone();
        self.prompts.lock().unwrap().push(user.clone());

        let body = if user.contains("Chapter: 1 Intro") {
            serde_json::json!({"evaluations": [{
                "original_sentence": "The door must be opened by the user.",
                "has_issue": true,
                "reason": "Concise sentences: uses passive voice.",
                "suggestion": "The user opens the door."
            }]})
        } else if user.contains("Chapter: 2 Safety") {
            serde_json::json!({"evaluations": [{
                "original_sentence": "The system shall always respond appropriately.",
                "has_issue": true,
                "reason": "Ambiguous wording: \"appropriately\" is vague.",
                "suggestion": "The system shall respond within 200 ms."
            }]})
        } else {
            anyhow::bail!("unexpected chapter");
        };

        Ok(LlmResponse {
            text: format!("Here is the evaluation.\n```json\n{body}\n```"),
            provider: "stub".into(),
            model: "stub".into(),
            meta: serde_json::Value::Null,
        })
    }

    fn provider_name(&self) -> &'static str {
        "stub"
    }
}

#[tokio::test]
async fn two_chapter_document_yields_two_issue_rows() {
    let stub = Arc::new(StubService {
        prompts: Mutex::new(Vec::new()),
    });
    let rules = RuleSet::new([EvaluationRule::Conciseness, EvaluationRule::Ambiguity]).unwrap();
    let runner = ReviewRunner::new(EvaluationClient::new(stub.clone()), 1);

    let run = runner.run(DOCUMENT, &rules, None).await.unwrap();

    let labels: Vec<_> = run.chapters.iter().map(|c| c.label.as_str()).collect();
    assert_eq!(labels, vec!["1 Intro", "2 Safety"]);

    let report = &run.report;
    assert!(report.parse_errors.is_empty());
    let rows: Vec<&str> = report.issues_table.lines().skip(2).collect();
    assert_eq!(rows.len(), 2);
    assert!(rows[0].contains("passive voice"));
    assert!(rows[1].contains("appropriately"));

    let prompts = stub.prompts.lock().unwrap();
    assert_eq!(prompts.len(), 2);
    for prompt in prompts.iter() {
        assert!(prompt.contains(EvaluationRule::Conciseness.description()));
        assert!(prompt.contains(EvaluationRule::Ambiguity.description()));
        assert!(!prompt.contains(EvaluationRule::Typos.description()));
    }
}

struct FlakyService;

#[async_trait]
impl LlmClient for FlakyService {
    async fn complete(&self, messages: &[ChatMessage]) -> anyhow::Result<LlmResponse> {
        if messages[1].content.contains("Chapter: 1 Intro") {
            anyhow::bail!("connection reset by peer");
        }
        Ok(LlmResponse {
            text: "I am unable to produce JSON today.".into(),
            provider: "flaky".into(),
            model: "flaky".into(),
            meta: serde_json::Value::Null,
        })
    }

    fn provider_name(&self) -> &'static str {
        "flaky"
    }
}

#[tokio::test]
async fn failing_chapters_degrade_to_parse_errors() {
    let runner = ReviewRunner::new(EvaluationClient::new(Arc::new(FlakyService)), 2);
    let run = runner.run(DOCUMENT, &RuleSet::all(), None).await.unwrap();

    let report = &run.report;
    assert_eq!(report.issues_table, NO_ISSUES_FOUND);
    assert!(report.all_items.is_empty());
    assert_eq!(report.parse_errors.len(), 2);
    assert!(report.parse_errors[0]
        .error
        .contains("connection reset by peer"));
    assert_eq!(
        report.parse_errors[1].response,
        "I am unable to produce JSON today."
    );
}
