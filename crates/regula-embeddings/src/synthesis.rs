//! Rule text synthesis.
//!
//! Format, one labeled line per present field, in this order:
//!
//! ```text
//! Rule ID: <rule_id>
//! Category: <category>
//! Title: <title>
//! Description: <description>
//! Keywords: <k1>, <k2>
//! Source: <source_text>
//! References: <r1>; <r2>
//! Slide: <slide_number>
//! ```
//!
//! Blank values are left out entirely, the rest are trimmed. The output has no
//! trailing newline and is never truncated here.

use regula_core::constants::{KEYWORD_DELIMITER, REFERENCE_DELIMITER};
use regula_core::Rule;

/// Build the document text embedded for `rule`. Deterministic.
pub fn synthesize(rule: &Rule) -> String {
    let mut lines: Vec<String> = Vec::with_capacity(8);

    push_field(&mut lines, "Rule ID", &rule.rule_id);
    push_field(&mut lines, "Category", &rule.category);
    push_field(&mut lines, "Title", &rule.title);
    push_field(&mut lines, "Description", &rule.description);
    push_list(&mut lines, "Keywords", &rule.keywords, KEYWORD_DELIMITER);
    if let Some(source) = &rule.source_text {
        push_field(&mut lines, "Source", source);
    }
    push_list(&mut lines, "References", &rule.references, REFERENCE_DELIMITER);
    push_field(&mut lines, "Slide", &rule.slide_number);

    lines.join("\n")
}

/// Normalize a free-text query for embedding.
pub fn synthesize_query(text: &str) -> String {
    text.trim().to_string()
}

fn push_field(lines: &mut Vec<String>, label: &str, value: &str) {
    let value = value.trim();
    if !value.is_empty() {
        lines.push(format!("{label}: {value}"));
    }
}

fn push_list(lines: &mut Vec<String>, label: &str, values: &[String], delimiter: &str) {
    let items: Vec<&str> = values
        .iter()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .collect();
    if !items.is_empty() {
        lines.push(format!("{label}: {}", items.join(delimiter)));
    }
}
