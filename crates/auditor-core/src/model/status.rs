use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Computed status of a check, a requirement, a sample, or the whole audit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum RequirementStatus {
    #[default]
    NotAudited,
    PartiallyAudited,
    Passed,
    Failed,
}

impl RequirementStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequirementStatus::NotAudited => "not_audited",
            RequirementStatus::PartiallyAudited => "partially_audited",
            RequirementStatus::Passed => "passed",
            RequirementStatus::Failed => "failed",
        }
    }
}

/// What the auditor recorded for a check's triggering condition.
///
/// `Passed` is the "complies" button: the condition holds and the pass
/// criteria decide. `NotApplicable` is the "does not comply" button: the
/// condition does not hold, so the check passes automatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum CheckOverallStatus {
    #[default]
    NotAudited,
    Passed,
    NotApplicable,
}

/// Status of a single pass criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PassCriterionStatus {
    #[default]
    NotAudited,
    Passed,
    Failed,
}

impl PassCriterionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PassCriterionStatus::NotAudited => "not_audited",
            PassCriterionStatus::Passed => "passed",
            PassCriterionStatus::Failed => "failed",
        }
    }
}

/// How a check combines its pass criteria.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum CheckLogic {
    #[default]
    #[serde(rename = "AND")]
    And,
    #[serde(rename = "OR")]
    Or,
}

impl CheckLogic {
    /// Case-insensitive parse used by the normalization boundary.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "AND" => Some(CheckLogic::And),
            "OR" => Some(CheckLogic::Or),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CheckLogic::And => "AND",
            CheckLogic::Or => "OR",
        }
    }
}

/// Status shown by list and sidebar views.
///
/// Identical to [`RequirementStatus`] except for `Updated`, which masks the
/// computed status while a result needs review after a rule-file change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum DisplayStatus {
    NotAudited,
    PartiallyAudited,
    Passed,
    Failed,
    Updated,
}

impl From<RequirementStatus> for DisplayStatus {
    fn from(status: RequirementStatus) -> Self {
        match status {
            RequirementStatus::NotAudited => DisplayStatus::NotAudited,
            RequirementStatus::PartiallyAudited => DisplayStatus::PartiallyAudited,
            RequirementStatus::Passed => DisplayStatus::Passed,
            RequirementStatus::Failed => DisplayStatus::Failed,
        }
    }
}
