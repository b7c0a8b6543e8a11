//! v001: index_state (active generation, established dimension) and
//! rule_records (one row per rule per generation).

pub const MIGRATION_SQL: &str = "
CREATE TABLE IF NOT EXISTS index_state (
    id                INTEGER PRIMARY KEY CHECK (id = 1),
    active_generation INTEGER NOT NULL DEFAULT 0,
    dimensions        INTEGER,
    updated_at        TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
);

INSERT OR IGNORE INTO index_state (id, active_generation) VALUES (1, 0);

CREATE TABLE IF NOT EXISTS rule_records (
    generation    INTEGER NOT NULL,
    rule_id       TEXT NOT NULL,
    embedding     BLOB NOT NULL,
    dimensions    INTEGER NOT NULL,
    document      TEXT NOT NULL,
    content_hash  TEXT NOT NULL,
    metadata      TEXT NOT NULL DEFAULT '{}',
    PRIMARY KEY (generation, rule_id)
);

CREATE INDEX IF NOT EXISTS idx_rule_records_generation ON rule_records(generation);
";
