//! Needs-help collection.
//!
//! Walks sample × relevant requirement × declared check × declared pass
//! criterion and reports every criterion whose stuck description is
//! non-blank. Rows for requirements that are no longer relevant stay in
//! storage but are never surfaced.

use auditor_core::config::ProblemsConfig;
use auditor_core::model::{
    AuditState, CheckId, DataQualityWarning, PassCriterionId, PassCriterionStatus, Requirement,
    RequirementKey, Sample, SampleId,
};
use auditor_observability::problems_span;
use auditor_relevance::get_relevant_requirements;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// One stuck pass criterion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProblemItem {
    pub sample_id: SampleId,
    pub sample_description: String,
    pub requirement_key: RequirementKey,
    /// Human-facing requirement identifier.
    pub requirement_id: String,
    pub requirement_title: String,
    pub check_id: CheckId,
    pub pass_criterion_id: PassCriterionId,
    pub status: PassCriterionStatus,
    pub observation_text: String,
    pub stuck_text: String,
}

/// Problems plus the data-quality warnings found on the way.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProblemScan {
    pub items: Vec<ProblemItem>,
    pub warnings: Vec<DataQualityWarning>,
}

fn scan_requirement(
    sample: &Sample,
    requirement: &Requirement,
    config: &ProblemsConfig,
    scan: &mut ProblemScan,
) {
    let Some(result) = sample.result(&requirement.key) else {
        return;
    };
    for check in &requirement.checks {
        let Some(check_result) = result.check_result(&check.id) else {
            continue;
        };
        for pc in &check.pass_criteria {
            let Some(pc_result) = check_result.pass_criterion(&pc.id) else {
                continue;
            };
            if !pc_result.is_stuck() {
                continue;
            }
            if pc_result.status != PassCriterionStatus::Failed {
                let warning = DataQualityWarning::StuckWithoutFailure {
                    sample_id: sample.id.clone(),
                    requirement_key: requirement.key.clone(),
                    check_id: check.id.clone(),
                    pass_criterion_id: pc.id.clone(),
                    status: pc_result.status,
                };
                tracing::warn!(warning = %warning.describe(), "stuck criterion is not failed");
                scan.warnings.push(warning);
                if !config.include_unfailed_stuck {
                    continue;
                }
            }
            scan.items.push(ProblemItem {
                sample_id: sample.id.clone(),
                sample_description: sample.description.clone(),
                requirement_key: requirement.key.clone(),
                requirement_id: requirement.display_id().to_string(),
                requirement_title: requirement.title.clone(),
                check_id: check.id.clone(),
                pass_criterion_id: pc.id.clone(),
                status: pc_result.status,
                observation_text: pc_result.observation_detail.clone(),
                stuck_text: pc_result.stuck_problem_description.trim().to_string(),
            });
        }
    }
}

/// Collect stuck criteria and data-quality warnings across the audit.
/// Items come out in sample order, then rule-file order.
pub fn scan_problems(state: &AuditState, config: &ProblemsConfig) -> ProblemScan {
    let _span = problems_span!(state.samples.len()).entered();
    let mut scan = ProblemScan::default();

    for sample in &state.samples {
        for requirement in get_relevant_requirements(&state.rule_file_content, sample) {
            scan_requirement(sample, requirement, config, &mut scan);
        }
    }

    for (sample_id, requirement_key) in state.orphaned_result_keys() {
        let warning = DataQualityWarning::OrphanedResult {
            sample_id: sample_id.to_string(),
            requirement_key: requirement_key.to_string(),
        };
        tracing::warn!(warning = %warning.describe(), "orphaned result");
        scan.warnings.push(warning);
    }

    tracing::debug!(
        items = scan.items.len(),
        warnings = scan.warnings.len(),
        "collected audit problems"
    );
    scan
}

/// Stuck criteria across the audit, with default settings.
pub fn collect_audit_problems(state: &AuditState) -> Vec<ProblemItem> {
    scan_problems(state, &ProblemsConfig::default()).items
}
