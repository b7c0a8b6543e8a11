/// Regula version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Slide sentinel meaning "applies to every slide".
pub const SLIDE_ANY: &str = "any";

/// Severity assigned to rules that do not declare one.
pub const DEFAULT_SEVERITY: &str = "medium";

/// Statistics bucket for blank category or severity values.
pub const UNKNOWN_BUCKET: &str = "unknown";

// Metadata fields stored per indexed rule. These are the only filterable fields.
pub const FIELD_RULE_ID: &str = "rule_id";
pub const FIELD_CATEGORY: &str = "category";
pub const FIELD_SLIDE_NUMBER: &str = "slide_number";
pub const FIELD_SEVERITY: &str = "severity";
pub const FIELD_REQUIRED: &str = "required";
pub const FIELD_KEYWORDS: &str = "keywords";

/// Every metadata field a search filter may reference.
pub const FILTERABLE_FIELDS: [&str; 6] = [
    FIELD_RULE_ID,
    FIELD_CATEGORY,
    FIELD_SLIDE_NUMBER,
    FIELD_SEVERITY,
    FIELD_REQUIRED,
    FIELD_KEYWORDS,
];

/// Delimiter used when keywords are flattened into metadata or embedding text.
pub const KEYWORD_DELIMITER: &str = ", ";

/// Delimiter used when references are flattened into embedding text.
pub const REFERENCE_DELIMITER: &str = "; ";
