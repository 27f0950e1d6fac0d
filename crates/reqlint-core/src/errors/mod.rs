use std::path::PathBuf;
use thiserror::Error;

/// Errors that stop a review before the first model call.
///
/// Failures of a single evaluation (service errors, malformed model output)
/// are never represented here: they are captured per chapter and end up in
/// the report's parse-error list.
#[derive(Debug, Error)]
pub enum ReviewError {
    #[error("select at least one evaluation rule")]
    NoRulesSelected,

    #[error("unknown evaluation rule '{0}' (see `reqlint rules`)")]
    UnknownRule(String),

    #[error("unsupported document format '{extension}': {path} (expected .docx, .pdf, .txt or .md)")]
    UnsupportedFormat { path: PathBuf, extension: String },

    #[error("failed to extract text from {path}: {detail}")]
    Extract { path: PathBuf, detail: String },

    #[error("config error{}: {detail}", path.as_ref().map(|p| format!(" in {}", p.display())).unwrap_or_default())]
    Config {
        path: Option<PathBuf>,
        detail: String,
    },

    #[error("missing credential: set {var} for provider '{provider}'")]
    MissingCredential {
        provider: &'static str,
        var: &'static str,
    },

    #[error("network policy 'deny' blocks provider '{provider}' (target {target}); use the fake provider or allow network access")]
    NetworkDenied {
        provider: &'static str,
        target: String,
    },
}

impl ReviewError {
    pub fn config(path: Option<PathBuf>, detail: impl Into<String>) -> Self {
        Self::Config {
            path,
            detail: detail.into(),
        }
    }

    pub fn extract(path: impl Into<PathBuf>, detail: impl Into<String>) -> Self {
        Self::Extract {
            path: path.into(),
            detail: detail.into(),
        }
    }
}

/// Walks an `anyhow` chain looking for a typed [`ReviewError`].
pub fn find_review_error(err: &anyhow::Error) -> Option<&ReviewError> {
    err.chain().find_map(|e| e.downcast_ref::<ReviewError>())
}
