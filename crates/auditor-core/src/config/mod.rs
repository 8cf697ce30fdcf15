//! Engine configuration, loaded from TOML with every field defaulted.

pub mod defaults;
mod observability_config;
mod problems_config;
mod sample_edit_config;

use serde::{Deserialize, Serialize};

pub use observability_config::ObservabilityConfig;
pub use problems_config::ProblemsConfig;
pub use sample_edit_config::{OrphanRetention, SampleEditConfig};

use crate::errors::ConfigError;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Top-level configuration for the audit engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditorConfig {
    pub problems: ProblemsConfig,
    pub sample_edit: SampleEditConfig,
    pub observability: ObservabilityConfig,
}

impl AuditorConfig {
    /// Parse a TOML document. Missing sections and fields take their defaults.
    pub fn from_toml(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source).map_err(|e| ConfigError::ParseError {
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string(self).map_err(|e| ConfigError::ParseError {
            message: e.to_string(),
        })
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if OrphanRetention::parse(&self.sample_edit.orphan_retention).is_none() {
            return Err(ConfigError::InvalidValue {
                field: "sample_edit.orphan_retention".to_string(),
                message: format!(
                    "expected \"discard\" or \"retain\", got {:?}",
                    self.sample_edit.orphan_retention
                ),
            });
        }
        let level = self.observability.log_level.to_ascii_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "observability.log_level".to_string(),
                message: format!("unknown level {:?}", self.observability.log_level),
            });
        }
        Ok(())
    }
}
