use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::status::PassCriterionStatus;

/// Malformed audit data the engine recovered from instead of failing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DataQualityWarning {
    /// A criterion carries a stuck description but is not `failed`.
    StuckWithoutFailure {
        sample_id: String,
        requirement_key: String,
        check_id: String,
        pass_criterion_id: String,
        status: PassCriterionStatus,
    },
    /// A requirement declares no checks; it can never be audited.
    RequirementWithoutChecks { requirement_key: String },
    /// A check declares no pass criteria; "complies" passes it vacuously.
    CheckWithoutPassCriteria {
        requirement_key: String,
        check_id: String,
    },
    /// A stored result references a requirement the rule file lacks.
    OrphanedResult {
        sample_id: String,
        requirement_key: String,
    },
}

impl DataQualityWarning {
    pub fn describe(&self) -> String {
        match self {
            DataQualityWarning::StuckWithoutFailure {
                sample_id,
                requirement_key,
                check_id,
                pass_criterion_id,
                status,
            } => format!(
                "sample {sample_id}: {requirement_key}/{check_id}/{pass_criterion_id} is stuck but {}",
                status.as_str()
            ),
            DataQualityWarning::RequirementWithoutChecks { requirement_key } => {
                format!("requirement {requirement_key} has no checks")
            }
            DataQualityWarning::CheckWithoutPassCriteria {
                requirement_key,
                check_id,
            } => format!("check {requirement_key}/{check_id} has no pass criteria"),
            DataQualityWarning::OrphanedResult {
                sample_id,
                requirement_key,
            } => format!(
                "sample {sample_id} has a result for unknown requirement {requirement_key}"
            ),
        }
    }
}
