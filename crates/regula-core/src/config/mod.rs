//! Configuration for Regula.
//! TOML-based, resolved as: env (`REGULA_*`) > config file > compiled defaults.
//! Every engine takes its config explicitly; nothing is read from ambient state
//! after construction.

pub mod corpus_config;
pub mod defaults;
pub mod embedding_config;
pub mod index_config;
pub mod regula_config;
pub mod retrieval_config;

pub use corpus_config::CorpusConfig;
pub use embedding_config::EmbeddingConfig;
pub use index_config::IndexConfig;
pub use regula_config::RegulaConfig;
pub use retrieval_config::RetrievalConfig;
