//! Stable error codes for callers that branch on failure kind.

/// Maps an error onto the stable code set below.
pub trait RegulaErrorCode {
    /// Returns the error code string (e.g., "EMPTY_CORPUS").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted error string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const NOT_FOUND: &str = "NOT_FOUND";
pub const EMPTY_CORPUS: &str = "EMPTY_CORPUS";
pub const CORPUS_ERROR: &str = "CORPUS_ERROR";
pub const VALIDATION_FAILED: &str = "VALIDATION_FAILED";
pub const DIMENSION_MISMATCH: &str = "DIMENSION_MISMATCH";
pub const INVALID_ARGUMENT: &str = "INVALID_ARGUMENT";
pub const EMBEDDING_ERROR: &str = "EMBEDDING_ERROR";
pub const INDEX_UNAVAILABLE: &str = "INDEX_UNAVAILABLE";
pub const STORAGE_ERROR: &str = "STORAGE_ERROR";
pub const MIGRATION_FAILED: &str = "MIGRATION_FAILED";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const SERIALIZATION_ERROR: &str = "SERIALIZATION_ERROR";
pub const TIMEOUT: &str = "TIMEOUT";
pub const TASK_FAILED: &str = "TASK_FAILED";
