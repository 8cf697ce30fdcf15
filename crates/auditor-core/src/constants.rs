/// Engine version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prefix of the key given to requirements that carry neither `key` nor `id`.
pub const FALLBACK_REQUIREMENT_KEY_PREFIX: &str = "requirement-";

/// Prefix of the id given to samples persisted without one.
pub const FALLBACK_SAMPLE_ID_PREFIX: &str = "sample-";
