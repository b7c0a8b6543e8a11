//! Schema migrations using PRAGMA user_version.

pub mod v001_initial_schema;

use rusqlite::Connection;
use tracing::info;

use regula_core::errors::{RegulaResult, StorageError};

/// Latest schema version.
pub const LATEST_VERSION: u32 = 1;

/// Run all pending migrations.
pub fn run_migrations(conn: &Connection) -> RegulaResult<()> {
    let current = current_version(conn)?;

    let migrations: &[(&str, u32)] = &[(v001_initial_schema::MIGRATION_SQL, 1)];

    for (sql, version) in migrations {
        if current < *version {
            conn.execute_batch(sql)
                .map_err(|e| StorageError::MigrationFailed {
                    version: *version,
                    reason: e.to_string(),
                })?;
            conn.pragma_update(None, "user_version", version)
                .map_err(|e| StorageError::MigrationFailed {
                    version: *version,
                    reason: e.to_string(),
                })?;
            info!(version = version, "applied migration");
        }
    }
    Ok(())
}

pub fn current_version(conn: &Connection) -> RegulaResult<u32> {
    conn.pragma_query_value(None, "user_version", |row| row.get(0))
        .map_err(|e| {
            StorageError::SqliteError {
                message: e.to_string(),
            }
            .into()
        })
}
