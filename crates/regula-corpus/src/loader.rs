//! Corpus document parsing.

use std::path::Path;

use serde::Deserialize;

use regula_core::errors::{CorpusError, RegulaResult};
use regula_core::Rule;

/// On-disk corpus encodings, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorpusFormat {
    Json,
    Toml,
}

impl CorpusFormat {
    /// `.toml` files are TOML; everything else is read as JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Self::Toml,
            _ => Self::Json,
        }
    }
}

/// The document shape. `rules` is optional so that its absence is reported as
/// an empty corpus rather than a parse failure.
#[derive(Debug, Deserialize)]
struct CorpusDocument {
    #[serde(default)]
    rules: Option<Vec<Rule>>,
}

/// Parse a corpus document. `source_name` labels errors.
pub(crate) fn parse(raw: &str, format: CorpusFormat, source_name: &str) -> RegulaResult<Vec<Rule>> {
    let doc: CorpusDocument = match format {
        CorpusFormat::Json => serde_json::from_str(raw).map_err(|e| CorpusError::ParseFailed {
            path: source_name.to_string(),
            reason: e.to_string(),
        })?,
        CorpusFormat::Toml => toml::from_str(raw).map_err(|e| CorpusError::ParseFailed {
            path: source_name.to_string(),
            reason: e.to_string(),
        })?,
    };

    match doc.rules {
        Some(rules) if !rules.is_empty() => Ok(rules),
        _ => Err(CorpusError::EmptyCorpus {
            source_name: source_name.to_string(),
        }
        .into()),
    }
}

/// Read and parse a corpus file.
pub(crate) fn read(path: &Path) -> RegulaResult<Vec<Rule>> {
    let display = path.display().to_string();
    if !path.exists() {
        return Err(CorpusError::SourceNotFound { path: display }.into());
    }
    let raw = std::fs::read_to_string(path).map_err(|e| CorpusError::ReadFailed {
        path: display.clone(),
        reason: e.to_string(),
    })?;
    parse(&raw, CorpusFormat::from_path(path), &display)
}
