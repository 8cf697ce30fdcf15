//! Per-sample and per-audit status statistics.

use auditor_core::model::{AuditState, RequirementStatus, RuleFile, Sample, SampleId};
use auditor_relevance::get_relevant_requirements;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::aggregator::{calculate_requirement_status, roll_up_counts};

/// Counts of computed statuses. `needs_review` is counted on top of the
/// computed status, not instead of it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct StatusCounts {
    pub not_audited: usize,
    pub partially_audited: usize,
    pub passed: usize,
    pub failed: usize,
    pub needs_review: usize,
}

impl StatusCounts {
    pub fn record(&mut self, status: RequirementStatus, needs_review: bool) {
        match status {
            RequirementStatus::NotAudited => self.not_audited += 1,
            RequirementStatus::PartiallyAudited => self.partially_audited += 1,
            RequirementStatus::Passed => self.passed += 1,
            RequirementStatus::Failed => self.failed += 1,
        }
        if needs_review {
            self.needs_review += 1;
        }
    }

    pub fn merge(&mut self, other: &StatusCounts) {
        self.not_audited += other.not_audited;
        self.partially_audited += other.partially_audited;
        self.passed += other.passed;
        self.failed += other.failed;
        self.needs_review += other.needs_review;
    }

    pub fn total(&self) -> usize {
        self.not_audited + self.partially_audited + self.passed + self.failed
    }

    /// Requirements with a final verdict.
    pub fn completed(&self) -> usize {
        self.passed + self.failed
    }

    /// Share of completed requirements in `[0, 1]`; 0 when empty.
    pub fn progress(&self) -> f64 {
        match self.total() {
            0 => 0.0,
            total => self.completed() as f64 / total as f64,
        }
    }

    /// Overall status under the requirement-level roll-up rules.
    pub fn status(&self) -> RequirementStatus {
        roll_up_counts(self.total(), self.not_audited, self.passed, self.failed)
    }
}

/// Statistics for one sample over its relevant requirements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct StatusSummary {
    pub sample_id: SampleId,
    pub counts: StatusCounts,
    pub status: RequirementStatus,
}

/// Statistics for the whole audit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct AuditSummary {
    pub samples: Vec<StatusSummary>,
    pub totals: StatusCounts,
    pub status: RequirementStatus,
}

pub fn summarize_sample(rule_file: &RuleFile, sample: &Sample) -> StatusSummary {
    let mut counts = StatusCounts::default();
    for requirement in get_relevant_requirements(rule_file, sample) {
        let result = sample.result(&requirement.key);
        counts.record(
            calculate_requirement_status(requirement, result),
            result.is_some_and(|r| r.needs_review),
        );
    }
    StatusSummary {
        sample_id: sample.id.clone(),
        status: counts.status(),
        counts,
    }
}

pub fn summarize_audit(state: &AuditState) -> AuditSummary {
    let samples: Vec<StatusSummary> = state
        .samples
        .iter()
        .map(|sample| summarize_sample(&state.rule_file_content, sample))
        .collect();
    let mut totals = StatusCounts::default();
    for summary in &samples {
        totals.merge(&summary.counts);
    }
    tracing::debug!(
        samples = samples.len(),
        requirements = totals.total(),
        needs_review = totals.needs_review,
        "summarized audit"
    );
    AuditSummary {
        samples,
        status: totals.status(),
        totals,
    }
}
