//! Splits extracted document text into chapters keyed by numeric headings.

use crate::model::{Chapter, UNCLASSIFIED};
use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

fn heading_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(\d+(?:\.\d+)*)\s+(.*)").expect("heading pattern is a valid regex")
    })
}

/// Returns the chapter label for a heading line such as `2.1 Interfaces`,
/// or `None` when the line is not a heading.
pub fn heading_label(line: &str) -> Option<String> {
    let caps = heading_re().captures(line)?;
    let number = caps.get(1)?.as_str();
    let title = caps.get(2).map(|m| m.as_str()).unwrap_or("");
    Some(format!("{} {}", number, title.trim_end_matches('\r')))
}

/// Segments `document_text` into chapters in order of first appearance.
///
/// Every line (including heading lines) is appended, newline-terminated, to
/// the chapter that is current when the line is read. A label seen again
/// later reopens its existing chapter instead of creating a new one.
pub fn segment(document_text: &str) -> Vec<Chapter> {
    let mut chapters: Vec<Chapter> = Vec::new();
    let mut by_label: HashMap<String, usize> = HashMap::new();
    let mut current = UNCLASSIFIED.to_string();

    for line in document_text.split('\n') {
        if let Some(label) = heading_label(line) {
            current = label;
        }
        let idx = match by_label.get(&current) {
            Some(&idx) => idx,
            None => {
                let idx = chapters.len();
                chapters.push(Chapter {
                    id: idx,
                    label: current.clone(),
                    content: String::new(),
                });
                by_label.insert(current.clone(), idx);
                idx
            }
        };
        let content = &mut chapters[idx].content;
        content.push_str(line);
        content.push('\n');
    }

    tracing::debug!(chapters = chapters.len(), "segmented document");
    chapters
}
