//! # regula-retrieval
//!
//! The query facade over an embedding provider and a vector index, plus the
//! pipeline that builds the index from a rule corpus.
//!
//! ```text
//! indexing: RuleCorpus -> validate -> synthesize -> embed_batch -> reindex
//! querying: text -> embed -> IVectorIndex::search -> hits
//! ```
//!
//! Thresholds and timeouts are caller-level policies (`policy`, `timeout`);
//! the index itself always returns raw ranked results.
//!
//! Query text that is empty or whitespace only is rejected with
//! `InvalidArgument` by every search entry point.

pub mod engine;
pub mod indexer;
pub mod policy;
pub mod timeout;

pub use engine::RetrievalEngine;
pub use indexer::{IndexReport, RuleIndexer};
pub use policy::apply_threshold;
pub use timeout::search_with_timeout;
