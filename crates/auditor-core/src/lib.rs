//! # auditor-core
//!
//! Foundation crate for the audit engine.
//! Defines the rule-file and sample records, errors, config, the
//! persistence-boundary normalization, content fingerprints, and the
//! requirement-result lifecycle. Every other crate in the workspace depends
//! on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod fingerprint;
pub mod lifecycle;
pub mod model;
pub mod normalize;

// Re-export the most commonly used types at the crate root.
pub use config::AuditorConfig;
pub use errors::{AuditError, AuditErrorCode, AuditResult, RuleFileError};
pub use lifecycle::{LifecycleEvent, ResultLifecycle};
pub use model::{
    AuditState, Check, CheckLogic, CheckOverallStatus, CheckResult, DataQualityWarning,
    DisplayStatus, PassCriterion, PassCriterionResult, PassCriterionStatus, Requirement,
    RequirementResult, RequirementStatus, RuleFile, Sample, SampleEdit,
};
