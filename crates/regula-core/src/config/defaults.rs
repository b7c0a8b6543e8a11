// Single source of truth for all default values.

// --- Corpus ---
pub const DEFAULT_RULE_ID_PREFIX: &str = "RG.";
pub const DEFAULT_STRICT_VALIDATION: bool = false;

// --- Embeddings ---
pub const DEFAULT_EMBEDDING_PROVIDER: &str = "tfidf";
pub const DEFAULT_EMBEDDING_MODEL: &str = "all-MiniLM-L6-v2";
pub const DEFAULT_EMBEDDING_DIMENSIONS: usize = 384;
pub const DEFAULT_EMBEDDING_BATCH_SIZE: usize = 32;
pub const DEFAULT_MAX_INPUT_CHARS: usize = 8_192;
pub const DEFAULT_MAX_SEQUENCE_LENGTH: usize = 256;
pub const DEFAULT_L1_CACHE_SIZE: u64 = 10_000;
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

// --- Index ---
pub const DEFAULT_INDEX_DIR: &str = "regula_index";
pub const DEFAULT_DB_FILENAME: &str = "rules.db";
pub const DEFAULT_BUSY_TIMEOUT_MS: u32 = 5_000;
pub const DEFAULT_READ_POOL_SIZE: usize = 4;

// --- Retrieval ---
pub const DEFAULT_TOP_K: usize = 10;
pub const DEFAULT_MAX_RESULTS: usize = 50;
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.7;
pub const DEFAULT_QUERY_TIMEOUT_MS: u64 = 30_000;

// --- Observability ---
pub const DEFAULT_LOG_FILTER: &str = "regula=info";
pub const LOG_ENV_VAR: &str = "REGULA_LOG";
