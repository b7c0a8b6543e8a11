//! ONNX Runtime sentence-transformer provider.
//!
//! Tokenizes with a HuggingFace `tokenizer.json`, runs the model through `ort`,
//! mean-pools the last hidden state over the attention mask, and L2-normalizes.
//! Token sequences longer than `max_sequence_length` are truncated silently.

use std::path::Path;
use std::sync::Mutex;

use ort::session::Session;
use ort::value::Tensor;
use regula_core::config::EmbeddingConfig;
use regula_core::errors::{EmbeddingError, RegulaResult};
use regula_core::traits::IEmbeddingProvider;
use tokenizers::Tokenizer;
use tracing::debug;

use crate::vectors::l2_normalize;

pub struct OnnxProvider {
    /// `Session::run` takes `&mut self`.
    session: Mutex<Session>,
    tokenizer: Tokenizer,
    dimensions: usize,
    max_sequence_length: usize,
    model_name: String,
}

/// Padded `[batch, seq]` inputs.
struct Encoded {
    ids: Vec<i64>,
    mask: Vec<i64>,
    lengths: Vec<usize>,
    seq_len: usize,
}

impl OnnxProvider {
    /// Load the model at `config.model_path` and the tokenizer at
    /// `config.tokenizer_path` (default: `tokenizer.json` next to the model).
    ///
    /// # Errors
    /// `ModelLoadFailed` if either file is missing or unreadable.
    pub fn load(config: &EmbeddingConfig) -> RegulaResult<Self> {
        let model_path = config
            .model_path
            .as_deref()
            .ok_or_else(|| EmbeddingError::ModelLoadFailed {
                path: "<unset>".to_string(),
                reason: "embedding.model_path is required for the onnx provider".to_string(),
            })?;
        let path = Path::new(model_path);
        if !path.exists() {
            return Err(load_failed(model_path, "model file not found"));
        }

        let tokenizer_path = match &config.tokenizer_path {
            Some(p) => p.clone(),
            None => path
                .with_file_name("tokenizer.json")
                .to_string_lossy()
                .into_owned(),
        };
        let tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| load_failed(&tokenizer_path, e.to_string()))?;

        let session = Session::builder()
            .map_err(|e| load_failed(model_path, e.to_string()))?
            .with_intra_threads(2)
            .map_err(|e| load_failed(model_path, e.to_string()))?
            .commit_from_file(model_path)
            .map_err(|e| load_failed(model_path, e.to_string()))?;

        let model_name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(config.model_name.as_str())
            .to_string();

        debug!(model = %model_name, dims = config.dimensions, "ONNX model loaded");

        Ok(Self {
            session: Mutex::new(session),
            tokenizer,
            dimensions: config.dimensions,
            max_sequence_length: config.max_sequence_length.max(2),
            model_name,
        })
    }

    fn encode(&self, texts: &[String]) -> RegulaResult<Encoded> {
        let mut rows: Vec<(Vec<i64>, Vec<i64>)> = Vec::with_capacity(texts.len());
        for text in texts {
            let encoding = self.tokenizer.encode(text.as_str(), true).map_err(|e| {
                EmbeddingError::InferenceFailed {
                    reason: format!("tokenization failed: {e}"),
                }
            })?;
            let mut ids: Vec<i64> = encoding.get_ids().iter().map(|&id| id as i64).collect();
            let mut mask: Vec<i64> = encoding
                .get_attention_mask()
                .iter()
                .map(|&m| m as i64)
                .collect();
            ids.truncate(self.max_sequence_length);
            mask.truncate(self.max_sequence_length);
            rows.push((ids, mask));
        }

        let seq_len = rows.iter().map(|(ids, _)| ids.len()).max().unwrap_or(0).max(1);
        let mut encoded = Encoded {
            ids: Vec::with_capacity(rows.len() * seq_len),
            mask: Vec::with_capacity(rows.len() * seq_len),
            lengths: Vec::with_capacity(rows.len()),
            seq_len,
        };
        for (ids, mask) in rows {
            encoded.lengths.push(ids.len());
            let pad = seq_len - ids.len();
            encoded.ids.extend(ids);
            encoded.ids.extend(std::iter::repeat(0).take(pad));
            encoded.mask.extend(mask);
            encoded.mask.extend(std::iter::repeat(0).take(pad));
        }
        Ok(encoded)
    }

    fn infer(&self, texts: &[String]) -> RegulaResult<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        let batch = texts.len();
        let encoded = self.encode(texts)?;
        let shape = vec![batch as i64, encoded.seq_len as i64];

        let ids_tensor = Tensor::from_array((shape.clone(), encoded.ids)).map_err(|e| {
            EmbeddingError::InferenceFailed {
                reason: format!("tensor creation error: {e}"),
            }
        })?;
        let mask_tensor = Tensor::from_array((shape, encoded.mask.clone())).map_err(|e| {
            EmbeddingError::InferenceFailed {
                reason: format!("tensor creation error: {e}"),
            }
        })?;

        let mut session = self
            .session
            .lock()
            .map_err(|e| EmbeddingError::InferenceFailed {
                reason: format!("session lock poisoned: {e}"),
            })?;

        let outputs = session
            .run(ort::inputs![ids_tensor, mask_tensor])
            .map_err(|e| EmbeddingError::InferenceFailed {
                reason: e.to_string(),
            })?;

        let (_name, output) =
            outputs
                .iter()
                .next()
                .ok_or_else(|| EmbeddingError::InferenceFailed {
                    reason: "no output tensor".to_string(),
                })?;

        let (out_shape, data) =
            output
                .try_extract_tensor::<f32>()
                .map_err(|e| EmbeddingError::InferenceFailed {
                    reason: format!("tensor extraction failed: {e}"),
                })?;

        let mut results = Vec::with_capacity(batch);
        match out_shape.len() {
            // [batch, seq, hidden]: mean over unmasked tokens.
            3 => {
                let seq_out = out_shape[1] as usize;
                let hidden = out_shape[2] as usize;
                for b in 0..batch {
                    let offset = b * seq_out * hidden;
                    let mut pooled = vec![0.0f32; hidden];
                    let mut count = 0.0f32;
                    for s in 0..encoded.lengths[b].min(seq_out) {
                        if encoded.mask[b * encoded.seq_len + s] == 0 {
                            continue;
                        }
                        count += 1.0;
                        let row = &data[offset + s * hidden..offset + (s + 1) * hidden];
                        for (acc, x) in pooled.iter_mut().zip(row) {
                            *acc += x;
                        }
                    }
                    let count = count.max(1.0);
                    for v in &mut pooled {
                        *v /= count;
                    }
                    l2_normalize(&mut pooled);
                    results.push(pooled);
                }
            }
            // [batch, hidden]: already pooled.
            2 => {
                let hidden = out_shape[1] as usize;
                for b in 0..batch {
                    let mut embedding = data[b * hidden..(b + 1) * hidden].to_vec();
                    l2_normalize(&mut embedding);
                    results.push(embedding);
                }
            }
            _ => {
                return Err(EmbeddingError::InferenceFailed {
                    reason: format!("unexpected output shape: {out_shape:?}"),
                }
                .into());
            }
        }
        Ok(results)
    }
}

impl IEmbeddingProvider for OnnxProvider {
    fn embed_one(&self, text: &str) -> RegulaResult<Vec<f32>> {
        self.infer(&[text.to_string()])?
            .into_iter()
            .next()
            .ok_or_else(|| {
                EmbeddingError::InferenceFailed {
                    reason: "empty model output".to_string(),
                }
                .into()
            })
    }

    fn embed_batch(&self, texts: &[String]) -> RegulaResult<Vec<Vec<f32>>> {
        self.infer(texts)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        &self.model_name
    }

    fn is_available(&self) -> bool {
        true
    }
}

fn load_failed(path: &str, reason: impl Into<String>) -> regula_core::RegulaError {
    EmbeddingError::ModelLoadFailed {
        path: path.to_string(),
        reason: reason.into(),
    }
    .into()
}
