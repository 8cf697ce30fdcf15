use serde::{Deserialize, Serialize};

use super::defaults;

/// Needs-help collector configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProblemsConfig {
    /// Surface stuck criteria whose status is not `failed` (with a warning)
    /// instead of hiding them.
    pub include_unfailed_stuck: bool,
}

impl Default for ProblemsConfig {
    fn default() -> Self {
        Self {
            include_unfailed_stuck: defaults::DEFAULT_INCLUDE_UNFAILED_STUCK,
        }
    }
}
