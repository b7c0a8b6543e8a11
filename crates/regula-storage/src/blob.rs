//! Little-endian f32 blob encoding for stored vectors.

use regula_core::errors::{RegulaResult, StorageError};

pub fn f32_vec_to_bytes(v: &[f32]) -> Vec<u8> {
    v.iter().flat_map(|f| f.to_le_bytes()).collect()
}

/// Decode a stored vector, checking it holds exactly `expected_dims` values.
pub fn bytes_to_f32_vec(rule_id: &str, bytes: &[u8], expected_dims: usize) -> RegulaResult<Vec<f32>> {
    if bytes.len() != expected_dims * 4 {
        return Err(StorageError::CorruptRecord {
            rule_id: rule_id.to_string(),
            reason: format!(
                "embedding blob has {} bytes, expected {} for {} dimensions",
                bytes.len(),
                expected_dims * 4,
                expected_dims
            ),
        }
        .into());
    }
    Ok(bytes
        .chunks_exact(4)
        .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect())
}
