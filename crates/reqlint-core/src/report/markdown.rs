//! The downloadable markdown document.

use super::{escape_cell, AggregatedReport};
use crate::rules::RuleSet;
use std::fmt::Write as _;

pub struct DocumentContext<'a> {
    pub document: &'a str,
    pub rules: &'a RuleSet,
    pub chapters_evaluated: usize,
    pub chapters_skipped: usize,
    pub full_transcript: bool,
}

pub fn render_document(report: &AggregatedReport, ctx: &DocumentContext<'_>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# Expression Quality Review\n");
    let _ = writeln!(out, "- Document: `{}`", ctx.document);
    let _ = writeln!(out, "- Rules: {}", ctx.rules.labels().join(", "));
    let _ = writeln!(
        out,
        "- Chapters evaluated: {} (skipped: {})",
        ctx.chapters_evaluated, ctx.chapters_skipped
    );
    let _ = writeln!(
        out,
        "- Sentences evaluated: {}, issues: {}, unreadable responses: {}\n",
        report.item_count(),
        report.issue_count(),
        report.parse_errors.len()
    );

    let _ = writeln!(out, "## Findings\n");
    let _ = writeln!(out, "{}\n", report.issues_table);

    if !report.parse_errors.is_empty() {
        let _ = writeln!(out, "## Unreadable Responses\n");
        for (n, entry) in report.parse_errors.iter().enumerate() {
            let _ = writeln!(out, "{}. {}\n", n + 1, entry.error);
            let _ = writeln!(out, "````text\n{}\n````\n", entry.response.trim_end());
        }
    }

    if ctx.full_transcript {
        let _ = writeln!(out, "## All Evaluations\n");
        if report.all_items.is_empty() {
            let _ = writeln!(out, "No sentences were evaluated.\n");
        } else {
            let _ = writeln!(out, "| Original | Issue | Reason | Suggestion |");
            let _ = writeln!(out, "|----------|-------|--------|------------|");
            for item in &report.all_items {
                let _ = writeln!(
                    out,
                    "| {} | {} | {} | {} |",
                    escape_cell(&item.original_sentence),
                    if item.has_issue { "yes" } else { "no" },
                    escape_cell(&item.reason),
                    escape_cell(&item.suggestion)
                );
            }
            out.push('\n');
        }
    }
    out
}
