use serde::{Deserialize, Serialize};

use super::defaults;

/// Rule corpus loading and validation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorpusConfig {
    /// Prefix every `rule_id` must start with.
    pub rule_id_prefix: String,
    /// Abort indexing when validation reports any warning.
    pub strict_validation: bool,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            rule_id_prefix: defaults::DEFAULT_RULE_ID_PREFIX.to_string(),
            strict_validation: defaults::DEFAULT_STRICT_VALIDATION,
        }
    }
}
