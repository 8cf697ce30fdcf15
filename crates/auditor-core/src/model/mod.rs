pub mod audit_state;
pub mod result;
pub mod rule_file;
pub mod sample;
pub mod status;
pub mod warning;

pub use audit_state::{AuditState, Tombstone};
pub use result::{CheckResult, PassCriterionResult, RequirementResult};
pub use rule_file::{
    Check, ContentTypeDefinition, PassCriterion, Requirement, RuleFile, RuleFileMetadata,
    SampleCategory, SampleTypeDefinition,
};
pub use sample::{Sample, SampleEdit};
pub use status::{
    CheckLogic, CheckOverallStatus, DisplayStatus, PassCriterionStatus, RequirementStatus,
};
pub use warning::DataQualityWarning;

pub type RequirementKey = String;
pub type ContentTypeId = String;
pub type CheckId = String;
pub type PassCriterionId = String;
pub type SampleId = String;
