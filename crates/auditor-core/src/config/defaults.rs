// Single source of truth for all default values.

// --- Problems ---
pub const DEFAULT_INCLUDE_UNFAILED_STUCK: bool = true;

// --- Sample edit ---
pub const DEFAULT_ORPHAN_RETENTION: &str = "discard";

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = false;
