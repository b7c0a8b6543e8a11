//! Error handling for Regula.
//! One error enum per subsystem, `thiserror` only, aggregated into `RegulaError`.

pub mod corpus_error;
pub mod embedding_error;
pub mod error_code;
pub mod regula_error;
pub mod storage_error;

pub use corpus_error::CorpusError;
pub use embedding_error::EmbeddingError;
pub use error_code::RegulaErrorCode;
pub use regula_error::RegulaError;
pub use storage_error::StorageError;

/// Result alias used across the workspace.
pub type RegulaResult<T> = Result<T, RegulaError>;
