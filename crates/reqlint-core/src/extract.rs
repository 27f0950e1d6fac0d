//! Plain-text extraction from supported document formats.
//!
//! Extraction yields one flat string per document. Layout (pages, columns,
//! tables) is not preserved; heading lines survive as their own lines.

use crate::errors::ReviewError;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Text,
    Docx,
    Pdf,
}

impl DocumentFormat {
    pub fn from_path(path: &Path) -> Result<Self, ReviewError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "txt" | "md" => Ok(Self::Text),
            "docx" => Ok(Self::Docx),
            "pdf" => Ok(Self::Pdf),
            _ => Err(ReviewError::UnsupportedFormat {
                path: path.to_path_buf(),
                extension: ext,
            }),
        }
    }
}

pub fn extract_text(path: &Path) -> Result<String, ReviewError> {
    let format = DocumentFormat::from_path(path)?;
    let bytes = std::fs::read(path).map_err(|e| ReviewError::extract(path, e.to_string()))?;
    let text = match format {
        DocumentFormat::Text => String::from_utf8(bytes)
            .map_err(|e| ReviewError::extract(path, format!("not valid UTF-8: {e}")))?,
        DocumentFormat::Docx => docx_text(&bytes).map_err(|e| ReviewError::extract(path, e))?,
        DocumentFormat::Pdf => pdf_extract::extract_text_from_mem(&bytes)
            .map_err(|e| ReviewError::extract(path, e.to_string()))?,
    };
    tracing::info!(path = %path.display(), chars = text.chars().count(), "extracted document text");
    Ok(text)
}

/// Paragraph texts joined by newlines; runs within a paragraph are
/// concatenated.
fn docx_text(bytes: &[u8]) -> Result<String, String> {
    use docx_rs::{DocumentChild, ParagraphChild, RunChild};

    let docx = docx_rs::read_docx(bytes).map_err(|e| format!("docx parse error: {e:?}"))?;
    let mut paragraphs = Vec::new();
    for child in &docx.document.children {
        if let DocumentChild::Paragraph(para) = child {
            let mut text = String::new();
            for pc in &para.children {
                if let ParagraphChild::Run(run) = pc {
                    for rc in &run.children {
                        if let RunChild::Text(t) = rc {
                            text.push_str(&t.text);
                        }
                    }
                }
            }
            paragraphs.push(text);
        }
    }
    let mut out = paragraphs.join("\n");
    out.push('\n');
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_plain_text_files() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("spec.txt");
        std::fs::write(&path, "1 Intro\nThe system shall start.\n").unwrap();
        assert_eq!(
            extract_text(&path).unwrap(),
            "1 Intro\nThe system shall start.\n"
        );
    }

    #[test]
    fn rejects_unknown_extensions() {
        let err = extract_text(Path::new("notes.odt")).unwrap_err();
        assert!(matches!(err, ReviewError::UnsupportedFormat { ref extension, .. } if extension == "odt"));
    }

    #[test]
    fn missing_file_is_an_extraction_error() {
        let tmp = tempfile::tempdir().unwrap();
        let err = extract_text(&tmp.path().join("missing.md")).unwrap_err();
        assert!(matches!(err, ReviewError::Extract { .. }));
    }

    #[test]
    fn format_detection_is_case_insensitive() {
        assert_eq!(
            DocumentFormat::from_path(Path::new("A.DOCX")).unwrap(),
            DocumentFormat::Docx
        );
        assert_eq!(
            DocumentFormat::from_path(Path::new("b.Pdf")).unwrap(),
            DocumentFormat::Pdf
        );
    }

    #[test]
    fn reads_docx_paragraphs() {
        use docx_rs::{Docx, Paragraph, Run};

        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("spec.docx");
        let file = std::fs::File::create(&path).unwrap();
        Docx::new()
            .add_paragraph(Paragraph::new().add_run(Run::new().add_text("1 Intro")))
            .add_paragraph(
                Paragraph::new()
                    .add_run(Run::new().add_text("The door must be opened"))
                    .add_run(Run::new().add_text(".")),
            )
            .build()
            .pack(file)
            .unwrap();

        let text = extract_text(&path).unwrap();
        assert_eq!(text, "1 Intro\nThe door must be opened.\n");
    }
}
