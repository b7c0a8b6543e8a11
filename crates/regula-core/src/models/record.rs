use serde::{Deserialize, Serialize};

use super::Metadata;

/// blake3 hex digest of a document text.
pub fn content_hash(text: &str) -> String {
    blake3::hash(text.as_bytes()).to_hex().to_string()
}

/// One indexed rule: its vector, the text that was embedded, and its metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingRecord {
    pub rule_id: String,
    pub vector: Vec<f32>,
    /// The synthesized text the vector was computed from.
    pub document: String,
    /// blake3 of `document`.
    pub content_hash: String,
    pub metadata: Metadata,
}

impl EmbeddingRecord {
    /// Build a record, hashing `document`.
    pub fn new(
        rule_id: impl Into<String>,
        vector: Vec<f32>,
        document: impl Into<String>,
        metadata: Metadata,
    ) -> Self {
        let document = document.into();
        Self {
            rule_id: rule_id.into(),
            content_hash: content_hash(&document),
            vector,
            document,
            metadata,
        }
    }

    pub fn dimensions(&self) -> usize {
        self.vector.len()
    }
}

/// A ranked search result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub rule_id: String,
    pub document: String,
    pub metadata: Metadata,
    /// Cosine distance `1 - cosine_similarity`, in `[0.0, 2.0]`. Lower is closer.
    pub distance: f64,
}

impl SearchHit {
    /// Cosine similarity corresponding to `distance`.
    pub fn similarity(&self) -> f64 {
        1.0 - self.distance
    }
}
