use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Rule counts grouped for pre-flight sanity checks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusStatistics {
    pub total: usize,
    pub by_category: BTreeMap<String, usize>,
    pub by_severity: BTreeMap<String, usize>,
    pub by_slide: BTreeMap<String, usize>,
}
