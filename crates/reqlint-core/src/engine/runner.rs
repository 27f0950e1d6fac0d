use crate::model::Chapter;
use crate::report::progress::{ProgressEvent, ProgressSink};
use crate::report::{aggregate, AggregatedReport};
use crate::review::client::error_payload;
use crate::review::{build_prompt, EvaluationClient};
use crate::rules::RuleSet;
use crate::segment::segment;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChapterSummary {
    pub id: usize,
    pub label: String,
    pub lines: usize,
}

impl From<&Chapter> for ChapterSummary {
    fn from(c: &Chapter) -> Self {
        Self {
            id: c.id,
            label: c.label.clone(),
            lines: c.content.lines().count(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ReviewRun {
    /// Chapters that were sent to the model, in document order.
    pub chapters: Vec<ChapterSummary>,
    /// Chapters skipped because their content was blank.
    pub skipped: usize,
    pub report: AggregatedReport,
}

pub struct ReviewRunner {
    client: EvaluationClient,
    parallel: usize,
}

impl ReviewRunner {
    pub fn new(client: EvaluationClient, parallel: usize) -> Self {
        Self {
            client,
            parallel: parallel.max(1),
        }
    }

    /// Segments, evaluates and aggregates one document.
    ///
    /// Chapters are evaluated by at most `parallel` concurrent workers;
    /// responses are put back into chapter order before aggregation.
    pub async fn run(
        &self,
        document_text: &str,
        rules: &RuleSet,
        progress: Option<ProgressSink>,
    ) -> anyhow::Result<ReviewRun> {
        let (units, blank): (Vec<Chapter>, Vec<Chapter>) =
            segment(document_text).into_iter().partition(|c| !c.is_blank());
        let total = units.len();
        tracing::info!(
            chapters = total,
            skipped = blank.len(),
            parallel = self.parallel,
            provider = self.client.provider_name(),
            "starting review"
        );

        // A permit travels with its task's result and is released only after
        // the progress event for that chapter has been emitted.
        let sem = Arc::new(Semaphore::new(self.parallel));
        let mut join_set = JoinSet::new();
        let mut queue = units.iter().enumerate().peekable();
        let mut responses: Vec<Option<String>> = vec![None; total];
        let mut done = 0;

        loop {
            while queue.peek().is_some() {
                let Ok(permit) = sem.clone().try_acquire_owned() else {
                    break;
                };
                let Some((idx, chapter)) = queue.next() else {
                    break;
                };
                let client = self.client.clone();
                let prompt = build_prompt(&chapter.unit_text(), rules);
                let label = chapter.label.clone();
                join_set.spawn(async move {
                    tracing::debug!(chapter = %label, "evaluating chapter");
                    let raw = client.evaluate(&prompt).await;
                    (idx, raw, permit)
                });
            }

            let Some(res) = join_set.join_next().await else {
                break;
            };
            let permit = match res {
                Ok((idx, raw, permit)) => {
                    responses[idx] = Some(raw);
                    Some(permit)
                }
                Err(e) => {
                    tracing::warn!(error = %e, "evaluation task failed");
                    None
                }
            };
            done += 1;
            if let Some(sink) = &progress {
                sink(ProgressEvent { done, total });
            }
            drop(permit);
        }

        let responses: Vec<String> = responses
            .into_iter()
            .map(|r| r.unwrap_or_else(|| error_payload("evaluation task did not complete", None)))
            .collect();

        let report = aggregate(&responses);
        tracing::info!(
            sentences = report.item_count(),
            issues = report.issue_count(),
            parse_errors = report.parse_errors.len(),
            "review finished"
        );

        Ok(ReviewRun {
            chapters: units.iter().map(ChapterSummary::from).collect(),
            skipped: blank.len(),
            report,
        })
    }
}
