use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::defaults;

/// What happens to results of requirements that stop being relevant after a
/// confirmed sample edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum OrphanRetention {
    /// Drop the results; this is the data loss the impact analysis warns about.
    #[default]
    Discard,
    /// Keep the rows in storage; they are hidden from display.
    Retain,
}

impl OrphanRetention {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "discard" => Some(Self::Discard),
            "retain" => Some(Self::Retain),
            _ => None,
        }
    }
}

/// Sample-edit configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SampleEditConfig {
    /// "discard" | "retain". Default: "discard".
    pub orphan_retention: String,
}

impl SampleEditConfig {
    /// Returns the effective retention policy, falling back to the default
    /// for unknown values.
    pub fn effective_orphan_retention(&self) -> OrphanRetention {
        OrphanRetention::parse(&self.orphan_retention).unwrap_or_default()
    }
}

impl Default for SampleEditConfig {
    fn default() -> Self {
        Self {
            orphan_retention: defaults::DEFAULT_ORPHAN_RETENTION.to_string(),
        }
    }
}
