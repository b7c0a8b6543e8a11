//! Corpus counts for pre-flight sanity checks.

use regula_core::constants::UNKNOWN_BUCKET;
use regula_core::models::CorpusStatistics;
use regula_core::Rule;

/// Count `rules` by category, severity, and slide.
///
/// Blank categories and severities land in the `"unknown"` bucket. Blank slides
/// count as `"any"`.
pub fn compute(rules: &[Rule]) -> CorpusStatistics {
    let mut stats = CorpusStatistics {
        total: rules.len(),
        ..Default::default()
    };
    for rule in rules {
        *stats.by_category.entry(bucket(&rule.category)).or_default() += 1;
        *stats.by_severity.entry(bucket(&rule.severity)).or_default() += 1;
        *stats
            .by_slide
            .entry(rule.effective_slide().to_string())
            .or_default() += 1;
    }
    stats
}

fn bucket(value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        UNKNOWN_BUCKET.to_string()
    } else {
        trimmed.to_string()
    }
}
