use super::error_code::{self, RegulaErrorCode};

/// Rule corpus loading errors.
#[derive(Debug, thiserror::Error)]
pub enum CorpusError {
    #[error("corpus source not found: {path}")]
    SourceNotFound { path: String },

    #[error("corpus {source_name} contains no rules")]
    EmptyCorpus { source_name: String },

    #[error("failed to read corpus {path}: {reason}")]
    ReadFailed { path: String, reason: String },

    #[error("failed to parse corpus {path}: {reason}")]
    ParseFailed { path: String, reason: String },

    #[error("corpus validation failed with {count} warning(s)")]
    ValidationFailed { count: usize },
}

impl RegulaErrorCode for CorpusError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::SourceNotFound { .. } => error_code::NOT_FOUND,
            Self::EmptyCorpus { .. } => error_code::EMPTY_CORPUS,
            Self::ValidationFailed { .. } => error_code::VALIDATION_FAILED,
            Self::ReadFailed { .. } | Self::ParseFailed { .. } => error_code::CORPUS_ERROR,
        }
    }
}
