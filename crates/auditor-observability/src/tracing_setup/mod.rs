//! Tracing setup: structured logging with span definitions.

pub mod spans;

use std::sync::Once;

use auditor_core::config::ObservabilityConfig;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Environment variable read for per-crate log levels.
///
/// Format: `AUDITOR_LOG=auditor_reconcile=debug,auditor_status=warn`
pub const LOG_ENV_VAR: &str = "AUDITOR_LOG";

/// Filter used when `AUDITOR_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "info";

fn env_filter(fallback: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(fallback))
}

/// Initialize human-readable tracing output.
///
/// Respects `AUDITOR_LOG`; defaults to `info`. Idempotent: only the first
/// call of any `init_*` function installs a subscriber.
pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_line_number(true))
            .with(env_filter(DEFAULT_FILTER))
            .init();
    });
}

/// Initialize tracing with JSON lines output.
pub fn init_tracing_json() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter(DEFAULT_FILTER))
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .json()
            .init();
    });
}

/// Initialize tracing with a custom filter string (for testing or embedding).
pub fn init_tracing_with_filter(filter: &str) {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new(filter))
            .with_target(true)
            .init();
    });
}

/// Initialize tracing from the `[observability]` config section.
/// `AUDITOR_LOG` still wins over `log_level` when set.
pub fn init_from_config(config: &ObservabilityConfig) {
    INIT.call_once(|| {
        let filter = env_filter(&config.log_level);
        if config.json {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(true)
                .json()
                .init();
        } else {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    });
}

/// Whether a subscriber has already been installed by this crate.
pub fn is_initialized() -> bool {
    INIT.is_completed()
}
