//! # regula-corpus
//!
//! Loads the regulatory rule corpus from disk, reports structural problems
//! without dropping rules, and offers order-preserving views and counts.
//!
//! ```text
//! RuleCorpus
//! ├── loader      (JSON / TOML `{ rules: [...] }` documents)
//! ├── validation  (missing fields, id prefix, duplicates)
//! └── statistics  (counts by category / severity / slide)
//! ```

pub mod corpus;
pub mod loader;
pub mod statistics;
pub mod validation;

pub use corpus::RuleCorpus;
pub use loader::CorpusFormat;
pub use validation::validate;
