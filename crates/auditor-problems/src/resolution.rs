//! "Problem solved": clear the stuck text and re-dispatch the result through
//! the normal update path.

use auditor_core::errors::{AuditError, AuditResult};
use auditor_core::model::{AuditState, Requirement, RequirementResult};
use auditor_status::apply_result_update;
use chrono::{DateTime, Utc};

use crate::collector::ProblemItem;

/// `result` with the stuck description of `check_id`/`pass_criterion_id`
/// cleared. Unknown ids leave the findings untouched.
pub fn mark_problem_solved(
    requirement: &Requirement,
    result: &RequirementResult,
    check_id: &str,
    pass_criterion_id: &str,
    now: DateTime<Utc>,
) -> RequirementResult {
    let mut updated = result.clone();
    match updated
        .check_results
        .get_mut(check_id)
        .and_then(|check| check.pass_criteria.get_mut(pass_criterion_id))
    {
        Some(pc) => pc.stuck_problem_description.clear(),
        None => tracing::debug!(
            requirement_key = %requirement.key,
            check_id,
            pass_criterion_id,
            "no recorded criterion to clear"
        ),
    }
    apply_result_update(requirement, Some(result), updated, now)
}

/// [`mark_problem_solved`] for a collected item, on a copy of the state.
pub fn resolve_problem(
    state: &AuditState,
    item: &ProblemItem,
    now: DateTime<Utc>,
) -> AuditResult<AuditState> {
    let requirement = state
        .rule_file_content
        .requirement(&item.requirement_key)
        .ok_or_else(|| AuditError::RequirementNotFound {
            requirement_key: item.requirement_key.clone(),
        })?;

    let mut next = state.clone();
    let sample = next
        .samples
        .iter_mut()
        .find(|s| s.id == item.sample_id)
        .ok_or_else(|| AuditError::SampleNotFound {
            sample_id: item.sample_id.clone(),
        })?;
    let current = sample
        .requirement_results
        .get(&item.requirement_key)
        .cloned()
        .unwrap_or_default();
    let solved = mark_problem_solved(
        requirement,
        &current,
        &item.check_id,
        &item.pass_criterion_id,
        now,
    );
    sample
        .requirement_results
        .insert(item.requirement_key.clone(), solved);

    tracing::info!(
        sample_id = %item.sample_id,
        requirement_key = %item.requirement_key,
        check_id = %item.check_id,
        pass_criterion_id = %item.pass_criterion_id,
        "problem marked solved"
    );
    Ok(next)
}
