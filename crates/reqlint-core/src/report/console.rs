use super::progress::{ProgressEvent, ProgressSink};
use super::AggregatedReport;
use std::sync::Arc;

#[must_use]
pub fn format_progress_line(done: usize, total: usize) -> String {
    format!("Evaluated chapter {}/{}", done, total)
}

/// Prints one line per finished chapter to stderr. Single-chapter runs print nothing.
pub fn default_progress_sink() -> ProgressSink {
    Arc::new(|ev: ProgressEvent| {
        if ev.total > 1 {
            eprintln!("{}", format_progress_line(ev.done, ev.total));
        }
    })
}

#[must_use]
pub fn format_summary(report: &AggregatedReport, chapters: usize) -> String {
    let mut line = format!(
        "Review complete: {} chapter(s), {} sentence(s), {} issue(s)",
        chapters,
        report.item_count(),
        report.issue_count()
    );
    if !report.parse_errors.is_empty() {
        line.push_str(&format!(
            ", {} unreadable response(s)",
            report.parse_errors.len()
        ));
    }
    line
}

pub fn print_summary(report: &AggregatedReport, chapters: usize) {
    eprintln!("{}", format_summary(report, chapters));
    for entry in &report.parse_errors {
        eprintln!("  warning: {}", entry.error);
    }
}
