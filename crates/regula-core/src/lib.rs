//! # regula-core
//!
//! Foundation crate for the Regula rule retrieval engine.
//! Defines the rule and record types, the capability traits for embedding
//! providers and vector indexes, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;
pub mod tracing_setup;

// Re-export the most commonly used types at the crate root.
pub use config::RegulaConfig;
pub use errors::{RegulaError, RegulaResult};
pub use models::{EmbeddingRecord, Metadata, MetadataFilter, Rule, SearchHit};
pub use traits::{IEmbeddingProvider, IVectorIndex};
