//! Writing results back: the re-dispatch path and review resolution.
//!
//! Every write goes through here so `status`, `lastStatusUpdate` and
//! `needsReview` stay consistent with the lifecycle rules.

use auditor_core::errors::LifecycleError;
use auditor_core::model::{Requirement, RequirementResult};
use auditor_core::{LifecycleEvent, ResultLifecycle};
use chrono::{DateTime, Utc};

use crate::aggregator::calculate_requirement_status;

fn stamp(next: &mut RequirementResult, previous: Option<&RequirementResult>, now: DateTime<Utc>) {
    let previous_status = previous.map(|p| p.status).unwrap_or_default();
    if next.status != previous_status {
        next.last_status_update = Some(now);
    } else if let Some(previous) = previous {
        next.last_status_update = previous.last_status_update;
    }
}

/// Store `updated` as the new result of `requirement`.
///
/// `status` is recomputed from the checks. `lastStatusUpdate` moves to `now`
/// only when the computed status changes. A pending review survives: the
/// incoming `needsReview` value is ignored in favour of `previous`.
pub fn apply_result_update(
    requirement: &Requirement,
    previous: Option<&RequirementResult>,
    updated: RequirementResult,
    now: DateTime<Utc>,
) -> RequirementResult {
    let mut next = updated;
    next.status = calculate_requirement_status(requirement, Some(&next));
    let lifecycle = previous
        .map(RequirementResult::lifecycle)
        .unwrap_or(ResultLifecycle::Fresh)
        .on_recorded(next.status);
    next.set_lifecycle(lifecycle);
    stamp(&mut next, previous, now);

    tracing::debug!(
        requirement_key = %requirement.key,
        status = next.status.as_str(),
        lifecycle = lifecycle.name(),
        "applied result update"
    );
    next
}

/// Accept the existing findings under the changed requirement definition.
/// Fails unless a review is pending.
pub fn acknowledge_review(
    requirement: &Requirement,
    result: &RequirementResult,
) -> Result<RequirementResult, LifecycleError> {
    let computed = calculate_requirement_status(requirement, Some(result));
    let lifecycle = result
        .lifecycle()
        .transition(LifecycleEvent::Acknowledged, computed)?;
    let mut next = result.clone();
    next.status = computed;
    next.set_lifecycle(lifecycle);
    tracing::info!(requirement_key = %requirement.key, "review acknowledged");
    Ok(next)
}

/// Record a fresh audit of the requirement. Clears a pending review.
pub fn reaudit(
    requirement: &Requirement,
    previous: &RequirementResult,
    updated: RequirementResult,
    now: DateTime<Utc>,
) -> Result<RequirementResult, LifecycleError> {
    let mut next = updated;
    next.status = calculate_requirement_status(requirement, Some(&next));
    let lifecycle = previous
        .lifecycle()
        .transition(LifecycleEvent::Reaudited, next.status)?;
    next.set_lifecycle(lifecycle);
    stamp(&mut next, Some(previous), now);
    tracing::info!(
        requirement_key = %requirement.key,
        status = next.status.as_str(),
        "requirement re-audited"
    );
    Ok(next)
}
