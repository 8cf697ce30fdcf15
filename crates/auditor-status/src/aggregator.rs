//! Check- and requirement-level status computation.
//!
//! Pure functions of (definition, recorded result). A missing result at any
//! level counts as not audited; nothing here fails.

use auditor_core::model::{
    Check, CheckLogic, CheckOverallStatus, CheckResult, DisplayStatus, PassCriterionStatus,
    Requirement, RequirementResult, RequirementStatus,
};
use auditor_observability::status_span;

/// Combine pass-criterion statuses under `logic`.
///
/// An empty set passes under both operators.
pub fn combine_pass_criteria<I>(logic: CheckLogic, statuses: I) -> RequirementStatus
where
    I: IntoIterator<Item = PassCriterionStatus>,
{
    let statuses: Vec<PassCriterionStatus> = statuses.into_iter().collect();
    if statuses.is_empty() {
        return RequirementStatus::Passed;
    }
    let passed = statuses
        .iter()
        .filter(|s| **s == PassCriterionStatus::Passed)
        .count();
    let failed = statuses
        .iter()
        .filter(|s| **s == PassCriterionStatus::Failed)
        .count();

    match logic {
        CheckLogic::And if passed == statuses.len() => RequirementStatus::Passed,
        CheckLogic::And if failed > 0 => RequirementStatus::Failed,
        CheckLogic::Or if passed > 0 => RequirementStatus::Passed,
        CheckLogic::Or if failed == statuses.len() => RequirementStatus::Failed,
        _ => RequirementStatus::PartiallyAudited,
    }
}

/// Status of one check.
///
/// `NotApplicable` ("does not comply" with the triggering condition) passes
/// the check without looking at its criteria. Criteria without a recorded
/// result count as not audited.
pub fn calculate_check_status(
    check: &Check,
    check_result: Option<&CheckResult>,
) -> RequirementStatus {
    let Some(result) = check_result else {
        return RequirementStatus::NotAudited;
    };
    match result.overall_status {
        CheckOverallStatus::NotAudited => RequirementStatus::NotAudited,
        CheckOverallStatus::NotApplicable => RequirementStatus::Passed,
        CheckOverallStatus::Passed => combine_pass_criteria(
            check.logic,
            check.pass_criteria.iter().map(|pc| {
                result
                    .pass_criterion(&pc.id)
                    .map(|r| r.status)
                    .unwrap_or_default()
            }),
        ),
    }
}

/// Roll up child statuses (checks of a requirement, requirements of a
/// sample, samples of an audit).
pub fn roll_up<I>(statuses: I) -> RequirementStatus
where
    I: IntoIterator<Item = RequirementStatus>,
{
    let mut total = 0usize;
    let mut not_audited = 0usize;
    let mut passed = 0usize;
    let mut failed = 0usize;
    for status in statuses {
        total += 1;
        match status {
            RequirementStatus::NotAudited => not_audited += 1,
            RequirementStatus::Passed => passed += 1,
            RequirementStatus::Failed => failed += 1,
            RequirementStatus::PartiallyAudited => {}
        }
    }
    roll_up_counts(total, not_audited, passed, failed)
}

pub(crate) fn roll_up_counts(
    total: usize,
    not_audited: usize,
    passed: usize,
    failed: usize,
) -> RequirementStatus {
    if total == 0 || not_audited == total {
        RequirementStatus::NotAudited
    } else if failed > 0 {
        RequirementStatus::Failed
    } else if passed == total {
        RequirementStatus::Passed
    } else {
        RequirementStatus::PartiallyAudited
    }
}

/// Status of one requirement from its checks. A requirement without checks
/// can never be audited.
pub fn calculate_requirement_status(
    requirement: &Requirement,
    result: Option<&RequirementResult>,
) -> RequirementStatus {
    let _span = status_span!(requirement.key).entered();
    if requirement.checks.is_empty() {
        tracing::trace!("requirement has no checks");
        return RequirementStatus::NotAudited;
    }
    let status = roll_up(requirement.checks.iter().map(|check| {
        calculate_check_status(check, result.and_then(|r| r.check_result(&check.id)))
    }));
    tracing::trace!(status = status.as_str(), "computed requirement status");
    status
}

/// Status for list views: `Updated` while a review is pending, otherwise the
/// computed status.
pub fn display_status(
    requirement: &Requirement,
    result: Option<&RequirementResult>,
) -> DisplayStatus {
    match result {
        Some(r) if r.needs_review => DisplayStatus::Updated,
        _ => calculate_requirement_status(requirement, result).into(),
    }
}
