//! Tracing initialization.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::defaults::{DEFAULT_LOG_FILTER, LOG_ENV_VAR};

static INIT: Once = Once::new();

/// Initialize the Regula tracing/logging system.
///
/// Reads the `REGULA_LOG` environment variable for per-crate log levels.
/// Format: `REGULA_LOG=regula_storage=debug,regula_embeddings=info`
///
/// Falls back to `regula=info` if `REGULA_LOG` is not set or is invalid.
/// Calling it more than once is a no-op, as is calling it after another
/// global subscriber was installed.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = env_filter();
        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .with(filter)
            .try_init();
    });
}

/// Same as [`init_tracing`] but emits one JSON object per event.
pub fn init_tracing_json() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(env_filter())
            .with_target(true)
            .json()
            .try_init();
    });
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}
