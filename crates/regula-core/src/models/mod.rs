pub mod metadata;
pub mod record;
pub mod rule;
pub mod statistics;
pub mod validation;

pub use metadata::{rule_metadata, Metadata, MetadataFilter};
pub use record::{content_hash, EmbeddingRecord, SearchHit};
pub use rule::Rule;
pub use statistics::CorpusStatistics;
pub use validation::{ValidationIssue, ValidationWarning};
