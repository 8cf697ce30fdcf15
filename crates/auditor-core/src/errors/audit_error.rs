use super::error_code::{self, AuditErrorCode};
use super::{ConfigError, LifecycleError, RuleFileError};

/// Result alias used across the audit engine crates.
pub type AuditResult<T> = Result<T, AuditError>;

/// Top-level error for the operations that are allowed to fail.
///
/// The pure computations (relevance, status, problems) never return this;
/// audit data degrades to defaults instead.
#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    #[error("invalid rule file: {0}")]
    InvalidRuleFile(#[from] RuleFileError),

    #[error("change report does not match this update: expected {expected}, got {actual}")]
    ReportMismatch { expected: String, actual: String },

    #[error("sample edit impact is stale for sample {sample_id}")]
    StaleImpact { sample_id: String },

    #[error("sample not found: {sample_id}")]
    SampleNotFound { sample_id: String },

    #[error("requirement not found: {requirement_key}")]
    RequirementNotFound { requirement_key: String },

    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AuditErrorCode for AuditError {
    fn error_code(&self) -> &'static str {
        match self {
            AuditError::InvalidRuleFile(_) => error_code::INVALID_RULE_FILE,
            AuditError::ReportMismatch { .. } => error_code::REPORT_MISMATCH,
            AuditError::StaleImpact { .. } => error_code::STALE_IMPACT,
            AuditError::SampleNotFound { .. } => error_code::SAMPLE_NOT_FOUND,
            AuditError::RequirementNotFound { .. } => error_code::REQUIREMENT_NOT_FOUND,
            AuditError::Lifecycle(e) => e.error_code(),
            AuditError::Config(e) => e.error_code(),
            AuditError::Serialization(_) => error_code::SERIALIZATION_ERROR,
        }
    }
}
