use super::error_code::{self, RegulaErrorCode};
use super::{CorpusError, EmbeddingError, StorageError};

/// Top-level error for every fallible Regula operation.
/// Aggregates subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum RegulaError {
    #[error("rule not found: {rule_id}")]
    NotFound { rule_id: String },

    #[error("corpus error: {0}")]
    CorpusError(#[from] CorpusError),

    #[error("embedding error: {0}")]
    EmbeddingError(#[from] EmbeddingError),

    #[error("storage error: {0}")]
    StorageError(#[from] StorageError),

    #[error("dimension mismatch: collection has {expected} dimensions, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: String },

    #[error("config error: {0}")]
    ConfigError(String),

    #[error("serialization error: {0}")]
    SerializationError(String),

    #[error("{operation} timed out after {timeout_ms}ms")]
    Timeout { operation: String, timeout_ms: u64 },

    #[error("background task failed: {reason}")]
    TaskFailed { reason: String },
}

impl RegulaError {
    /// Shorthand for an `InvalidArgument` error.
    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            reason: reason.into(),
        }
    }

    /// True for any not-found condition (missing corpus source or missing record).
    pub fn is_not_found(&self) -> bool {
        self.error_code() == error_code::NOT_FOUND
    }

    /// True for dimension mismatches raised by either the index or a provider.
    pub fn is_dimension_mismatch(&self) -> bool {
        self.error_code() == error_code::DIMENSION_MISMATCH
    }
}

impl From<serde_json::Error> for RegulaError {
    fn from(e: serde_json::Error) -> Self {
        Self::SerializationError(e.to_string())
    }
}

impl RegulaErrorCode for RegulaError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => error_code::NOT_FOUND,
            Self::CorpusError(e) => e.error_code(),
            Self::EmbeddingError(e) => e.error_code(),
            Self::StorageError(e) => e.error_code(),
            Self::DimensionMismatch { .. } => error_code::DIMENSION_MISMATCH,
            Self::InvalidArgument { .. } => error_code::INVALID_ARGUMENT,
            Self::ConfigError(_) => error_code::CONFIG_ERROR,
            Self::SerializationError(_) => error_code::SERIALIZATION_ERROR,
            Self::Timeout { .. } => error_code::TIMEOUT,
            Self::TaskFailed { .. } => error_code::TASK_FAILED,
        }
    }
}
