use super::AggregatedReport;
use crate::rules::RuleSet;
use serde_json::json;

pub const SCHEMA_VERSION: u32 = 1;

pub fn report_json(report: &AggregatedReport, document: &str, rules: &RuleSet) -> serde_json::Value {
    let issues: Vec<_> = report.issues().collect();
    json!({
        "schema_version": SCHEMA_VERSION,
        "generated_at": chrono::Utc::now().to_rfc3339(),
        "document": document,
        "rules": rules,
        "summary": {
            "sentences": report.item_count(),
            "issues": issues.len(),
            "parse_errors": report.parse_errors.len(),
        },
        "issues": issues,
        "evaluations": report.all_items,
        "parse_errors": report.parse_errors,
    })
}
