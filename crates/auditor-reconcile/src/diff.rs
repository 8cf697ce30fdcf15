//! Rule-file diff by requirement key.

use std::collections::HashSet;

use auditor_core::fingerprint::{
    requirement_fingerprint, rule_file_fingerprint, scope_fingerprint,
};
use auditor_core::model::{AuditState, Check, Requirement, RuleFile, SampleId};
use auditor_observability::reconcile_span;

use crate::report::{
    AddedRequirement, ChangeAspect, ChangeReport, RemovedRequirement, ResultRef,
    UpdatedRequirement,
};

fn pass_criteria_differ(old: &Check, new: &Check) -> bool {
    old.pass_criteria.len() != new.pass_criteria.len()
        || old
            .pass_criteria
            .iter()
            .zip(&new.pass_criteria)
            .any(|(a, b)| {
                a.id != b.id
                    || a.requirement.trim() != b.requirement.trim()
                    || a.failure_statement_template.trim() != b.failure_statement_template.trim()
            })
}

/// Audit-relevant differences between two definitions of one requirement.
/// Empty when only cosmetic fields changed.
pub fn change_aspects(old: &Requirement, new: &Requirement) -> Vec<ChangeAspect> {
    let mut aspects = Vec::new();
    if scope_fingerprint(old) != scope_fingerprint(new) {
        aspects.push(ChangeAspect::ContentTypes);
    }

    let old_ids: HashSet<&str> = old.checks.iter().map(|c| c.id.as_str()).collect();
    let new_ids: HashSet<&str> = new.checks.iter().map(|c| c.id.as_str()).collect();
    for check in old.checks.iter().filter(|c| !new_ids.contains(c.id.as_str())) {
        aspects.push(ChangeAspect::CheckRemoved {
            check_id: check.id.clone(),
        });
    }
    for check in new.checks.iter().filter(|c| !old_ids.contains(c.id.as_str())) {
        aspects.push(ChangeAspect::CheckAdded {
            check_id: check.id.clone(),
        });
    }

    let old_order: Vec<&str> = old
        .checks
        .iter()
        .map(|c| c.id.as_str())
        .filter(|id| new_ids.contains(id))
        .collect();
    let new_order: Vec<&str> = new
        .checks
        .iter()
        .map(|c| c.id.as_str())
        .filter(|id| old_ids.contains(id))
        .collect();
    if old_order != new_order {
        aspects.push(ChangeAspect::CheckOrder);
    }

    for new_check in &new.checks {
        let Some(old_check) = old.check(&new_check.id) else {
            continue;
        };
        if old_check.condition.trim() != new_check.condition.trim() {
            aspects.push(ChangeAspect::Condition {
                check_id: new_check.id.clone(),
            });
        }
        if old_check.logic != new_check.logic {
            aspects.push(ChangeAspect::Logic {
                check_id: new_check.id.clone(),
            });
        }
        if pass_criteria_differ(old_check, new_check) {
            aspects.push(ChangeAspect::PassCriteria {
                check_id: new_check.id.clone(),
            });
        }
    }
    aspects
}

fn samples_with_recorded_result(state: &AuditState, key: &str) -> Vec<SampleId> {
    state
        .samples
        .iter()
        .filter(|sample| sample.has_recorded_result(key))
        .map(|sample| sample.id.clone())
        .collect()
}

fn samples_with_result(state: &AuditState, key: &str) -> Vec<SampleId> {
    state
        .samples
        .iter()
        .filter(|sample| sample.result(key).is_some())
        .map(|sample| sample.id.clone())
        .collect()
}

/// Stored results under keys the old rule file does not define, split into
/// those neither file knows and those only the new file knows.
fn unmatched_results(
    state: &AuditState,
    new_rule_file: &RuleFile,
) -> (Vec<ResultRef>, Vec<ResultRef>) {
    let mut orphaned = Vec::new();
    let mut reappearing = Vec::new();
    for sample in &state.samples {
        for (key, result) in &sample.requirement_results {
            if state.rule_file_content.contains(key) {
                continue;
            }
            let entry = ResultRef {
                sample_id: sample.id.clone(),
                requirement_key: key.clone(),
                has_recorded_data: result.has_recorded_data(),
            };
            if new_rule_file.contains(key) {
                reappearing.push(entry);
            } else {
                orphaned.push(entry);
            }
        }
    }
    (orphaned, reappearing)
}

/// Compare the active rule file of `state` with `new_rule_file`.
///
/// Read-only. Added requirements keep new declaration order; updated and
/// removed keep old declaration order. Every stored result the update would
/// flag or delete is named, including results under keys the old rule file
/// never defined.
pub fn analyze_rule_file_changes(
    state: &AuditState,
    new_rule_file: &RuleFile,
) -> ChangeReport {
    let old_rule_file = &state.rule_file_content;
    let _span = reconcile_span!(old_rule_file.version(), new_rule_file.version()).entered();

    let added_requirements: Vec<AddedRequirement> = new_rule_file
        .requirements
        .iter()
        .filter(|r| !old_rule_file.contains(&r.key))
        .map(|r| AddedRequirement {
            key: r.key.clone(),
            id: r.display_id().to_string(),
            title: r.title.clone(),
        })
        .collect();

    let mut updated_requirements = Vec::new();
    let mut removed_requirements = Vec::new();
    for old in &old_rule_file.requirements {
        match new_rule_file.requirement(&old.key) {
            None => removed_requirements.push(RemovedRequirement {
                key: old.key.clone(),
                id: old.display_id().to_string(),
                title: old.title.clone(),
                affected_sample_ids: samples_with_recorded_result(state, &old.key),
            }),
            Some(new) if requirement_fingerprint(old) != requirement_fingerprint(new) => {
                updated_requirements.push(UpdatedRequirement {
                    key: new.key.clone(),
                    id: new.display_id().to_string(),
                    title: new.title.clone(),
                    aspects: change_aspects(old, new),
                    affected_sample_ids: samples_with_result(state, &old.key),
                });
            }
            Some(_) => {}
        }
    }

    let (orphaned_results, reappearing_results) = unmatched_results(state, new_rule_file);
    let report = ChangeReport {
        from_version: old_rule_file.version().to_string(),
        to_version: new_rule_file.version().to_string(),
        base_fingerprint: rule_file_fingerprint(old_rule_file),
        target_fingerprint: rule_file_fingerprint(new_rule_file),
        added_requirements,
        updated_requirements,
        removed_requirements,
        orphaned_results,
        reappearing_results,
    };
    tracing::debug!(
        added = report.added_requirements.len(),
        updated = report.updated_requirements.len(),
        removed = report.removed_requirements.len(),
        orphaned = report.orphaned_results.len(),
        "analyzed rule file changes"
    );
    report
}
