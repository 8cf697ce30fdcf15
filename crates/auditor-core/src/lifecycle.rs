//! Requirement-result lifecycle.
//!
//! The persisted record only carries `status` and the `needsReview` flag; this
//! module gives those two fields an explicit state machine:
//!
//! - Fresh / InProgress / Complete follow the computed status.
//! - Any state → StaleNeedsReview, only on `RuleFileChanged` (reconciler).
//! - StaleNeedsReview is sticky: recording new findings does not clear it.
//! - StaleNeedsReview → derived state, only on `Acknowledged` or `Reaudited`.
//! - `Acknowledged` outside StaleNeedsReview is rejected.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::errors::LifecycleError;
use crate::model::RequirementStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ResultLifecycle {
    /// Nothing recorded yet.
    Fresh,
    /// Some checks recorded, not all.
    InProgress,
    /// Every check recorded (passed or failed).
    Complete,
    /// The requirement changed under this result; the auditor must look again.
    StaleNeedsReview,
}

/// Events that move a result through its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// Findings were recorded through the normal update path.
    Recorded,
    /// The reconciler applied a rule file that changed the requirement.
    RuleFileChanged,
    /// The auditor accepted the existing findings under the new definition.
    Acknowledged,
    /// The auditor re-audited the requirement under the new definition.
    Reaudited,
}

impl LifecycleEvent {
    pub fn name(&self) -> &'static str {
        match self {
            LifecycleEvent::Recorded => "recorded",
            LifecycleEvent::RuleFileChanged => "rule_file_changed",
            LifecycleEvent::Acknowledged => "acknowledged",
            LifecycleEvent::Reaudited => "reaudited",
        }
    }
}

impl ResultLifecycle {
    /// State implied by a computed status when no review is pending.
    pub fn derived(status: RequirementStatus) -> Self {
        match status {
            RequirementStatus::NotAudited => ResultLifecycle::Fresh,
            RequirementStatus::PartiallyAudited => ResultLifecycle::InProgress,
            RequirementStatus::Passed | RequirementStatus::Failed => ResultLifecycle::Complete,
        }
    }

    pub fn from_parts(status: RequirementStatus, needs_review: bool) -> Self {
        if needs_review {
            ResultLifecycle::StaleNeedsReview
        } else {
            Self::derived(status)
        }
    }

    pub fn needs_review(&self) -> bool {
        matches!(self, ResultLifecycle::StaleNeedsReview)
    }

    pub fn name(&self) -> &'static str {
        match self {
            ResultLifecycle::Fresh => "fresh",
            ResultLifecycle::InProgress => "in_progress",
            ResultLifecycle::Complete => "complete",
            ResultLifecycle::StaleNeedsReview => "stale_needs_review",
        }
    }

    /// Findings were recorded. Never fails; a pending review stays pending.
    pub fn on_recorded(self, computed: RequirementStatus) -> Self {
        if self.needs_review() {
            self
        } else {
            Self::derived(computed)
        }
    }

    /// Apply `event`, given the status computed after the event.
    pub fn transition(
        self,
        event: LifecycleEvent,
        computed: RequirementStatus,
    ) -> Result<Self, LifecycleError> {
        match (self, event) {
            (_, LifecycleEvent::RuleFileChanged) => Ok(ResultLifecycle::StaleNeedsReview),
            (from, LifecycleEvent::Recorded) => Ok(from.on_recorded(computed)),
            (ResultLifecycle::StaleNeedsReview, LifecycleEvent::Acknowledged)
            | (_, LifecycleEvent::Reaudited) => Ok(Self::derived(computed)),
            (from, LifecycleEvent::Acknowledged) => Err(LifecycleError::InvalidTransition {
                from: from.name(),
                event: event.name(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_does_not_clear_stale() {
        let next = ResultLifecycle::StaleNeedsReview
            .transition(LifecycleEvent::Recorded, RequirementStatus::Passed)
            .unwrap();
        assert_eq!(next, ResultLifecycle::StaleNeedsReview);
    }

    #[test]
    fn acknowledge_requires_stale() {
        let err = ResultLifecycle::Complete
            .transition(LifecycleEvent::Acknowledged, RequirementStatus::Passed)
            .unwrap_err();
        assert_eq!(
            err,
            LifecycleError::InvalidTransition {
                from: "complete",
                event: "acknowledged"
            }
        );
    }

    #[test]
    fn reaudit_clears_stale() {
        let next = ResultLifecycle::StaleNeedsReview
            .transition(LifecycleEvent::Reaudited, RequirementStatus::PartiallyAudited)
            .unwrap();
        assert_eq!(next, ResultLifecycle::InProgress);
    }
}
