use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::status::{CheckOverallStatus, PassCriterionStatus, RequirementStatus};
use super::{CheckId, PassCriterionId};
use crate::lifecycle::ResultLifecycle;

/// Auditor input for one pass criterion.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct PassCriterionResult {
    pub status: PassCriterionStatus,
    pub observation_detail: String,
    /// Non-empty when the auditor is stuck and asks for help.
    pub stuck_problem_description: String,
}

impl PassCriterionResult {
    pub fn is_stuck(&self) -> bool {
        !self.stuck_problem_description.trim().is_empty()
    }

    pub fn has_recorded_data(&self) -> bool {
        self.status != PassCriterionStatus::NotAudited
            || !self.observation_detail.trim().is_empty()
            || self.is_stuck()
    }
}

/// Auditor input for one check.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct CheckResult {
    pub overall_status: CheckOverallStatus,
    pub pass_criteria: BTreeMap<PassCriterionId, PassCriterionResult>,
}

impl CheckResult {
    pub fn pass_criterion(&self, id: &str) -> Option<&PassCriterionResult> {
        self.pass_criteria.get(id)
    }

    pub fn has_recorded_data(&self) -> bool {
        self.overall_status != CheckOverallStatus::NotAudited
            || self.pass_criteria.values().any(|pc| pc.has_recorded_data())
    }
}

/// Stored result of one requirement on one sample.
///
/// `status` is derived from `check_results` and the requirement definition; it
/// is persisted for statistics but never edited directly.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct RequirementResult {
    pub status: RequirementStatus,
    pub needs_review: bool,
    pub actual_observation: String,
    pub comment_to_auditor: String,
    pub comment_to_actor: String,
    pub last_status_update: Option<DateTime<Utc>>,
    pub check_results: BTreeMap<CheckId, CheckResult>,
}

impl RequirementResult {
    pub fn check_result(&self, id: &str) -> Option<&CheckResult> {
        self.check_results.get(id)
    }

    /// Whether the auditor recorded anything at all. A result that is only
    /// the lazily-created default holds nothing worth protecting.
    pub fn has_recorded_data(&self) -> bool {
        self.status != RequirementStatus::NotAudited
            || self.last_status_update.is_some()
            || !self.actual_observation.trim().is_empty()
            || !self.comment_to_auditor.trim().is_empty()
            || !self.comment_to_actor.trim().is_empty()
            || self.check_results.values().any(|c| c.has_recorded_data())
    }

    /// Lifecycle state derived from the persisted fields.
    pub fn lifecycle(&self) -> ResultLifecycle {
        ResultLifecycle::from_parts(self.status, self.needs_review)
    }

    /// Persist a lifecycle state back onto the record.
    pub fn set_lifecycle(&mut self, lifecycle: ResultLifecycle) {
        self.needs_review = lifecycle.needs_review();
    }
}
