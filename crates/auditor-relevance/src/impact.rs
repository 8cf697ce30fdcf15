//! Sample-edit impact analysis.
//!
//! Flow: analyze → caller confirms (when the decision asks for it) → commit.
//! Analysis is pure and idempotent; commit re-runs it and refuses an impact
//! computed against a different sample or rule file.

use std::collections::HashSet;
use std::fmt;

use auditor_core::config::OrphanRetention;
use auditor_core::errors::{AuditError, AuditResult};
use auditor_core::model::{RequirementKey, RuleFile, Sample, SampleEdit};
use auditor_observability::impact_span;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::resolver::relevant_requirement_keys;

/// What a proposed sample edit does to the sample's relevant requirements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SampleEditImpact {
    pub sample_id: String,
    /// Newly relevant keys, in the order of the new relevant set.
    pub added_reqs: Vec<RequirementKey>,
    /// No-longer-relevant keys, in the order of the old relevant set.
    pub removed_reqs: Vec<RequirementKey>,
    /// True iff some removed key has recorded findings on the sample.
    pub data_will_be_lost: bool,
    /// The removed keys that hold recorded findings.
    pub lost_result_keys: Vec<RequirementKey>,
}

/// What the caller must do before saving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleEditDecision {
    /// Relevance is unchanged; save without asking.
    SaveImmediately,
    /// Relevance changes; stage the edit and ask the auditor.
    ConfirmationRequired { data_will_be_lost: bool },
}

impl SampleEditImpact {
    pub fn has_relevance_change(&self) -> bool {
        !self.added_reqs.is_empty() || !self.removed_reqs.is_empty()
    }

    pub fn decision(&self) -> SampleEditDecision {
        if self.has_relevance_change() {
            SampleEditDecision::ConfirmationRequired {
                data_will_be_lost: self.data_will_be_lost,
            }
        } else {
            SampleEditDecision::SaveImmediately
        }
    }
}

impl fmt::Display for SampleEditImpact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.has_relevance_change() {
            return write!(f, "Sample {}: no change to relevant requirements", self.sample_id);
        }
        writeln!(f, "Sample {}:", self.sample_id)?;
        if !self.added_reqs.is_empty() {
            writeln!(f, "  added requirements: {}", self.added_reqs.join(", "))?;
        }
        if !self.removed_reqs.is_empty() {
            writeln!(f, "  removed requirements: {}", self.removed_reqs.join(", "))?;
        }
        if self.data_will_be_lost {
            write!(
                f,
                "  recorded results will be lost for: {}",
                self.lost_result_keys.join(", ")
            )?;
        }
        Ok(())
    }
}

/// `sequence` minus `other`, keeping `sequence` order.
fn ordered_difference(
    sequence: &[RequirementKey],
    other: &[RequirementKey],
) -> Vec<RequirementKey> {
    let other: HashSet<&str> = other.iter().map(String::as_str).collect();
    sequence
        .iter()
        .filter(|key| !other.contains(key.as_str()))
        .cloned()
        .collect()
}

/// Diff the relevant requirement set of `sample_before` against the sample
/// as `proposed` would leave it.
pub fn analyze_sample_content_type_change(
    rule_file: &RuleFile,
    sample_before: &Sample,
    proposed: &SampleEdit,
) -> SampleEditImpact {
    let _span = impact_span!(sample_before.id).entered();
    let sample_after = proposed.apply_to(sample_before);

    let old_relevant = relevant_requirement_keys(rule_file, sample_before);
    let new_relevant = relevant_requirement_keys(rule_file, &sample_after);

    let added_reqs = ordered_difference(&new_relevant, &old_relevant);
    let removed_reqs = ordered_difference(&old_relevant, &new_relevant);
    let lost_result_keys: Vec<RequirementKey> = removed_reqs
        .iter()
        .filter(|key| sample_before.has_recorded_result(key))
        .cloned()
        .collect();

    tracing::debug!(
        added = added_reqs.len(),
        removed = removed_reqs.len(),
        lost = lost_result_keys.len(),
        "analyzed sample edit"
    );

    SampleEditImpact {
        sample_id: sample_before.id.clone(),
        added_reqs,
        removed_reqs,
        data_will_be_lost: !lost_result_keys.is_empty(),
        lost_result_keys,
    }
}

/// Apply a confirmed edit.
///
/// `impact` must be what [`analyze_sample_content_type_change`] returns for
/// the same inputs right now; otherwise the caller confirmed something else
/// and the edit is rejected with [`AuditError::StaleImpact`]. Results of
/// removed requirements are dropped or kept according to `retention`.
pub fn commit_sample_edit(
    rule_file: &RuleFile,
    sample_before: &Sample,
    edit: &SampleEdit,
    impact: &SampleEditImpact,
    retention: OrphanRetention,
) -> AuditResult<Sample> {
    let current = analyze_sample_content_type_change(rule_file, sample_before, edit);
    if current != *impact {
        return Err(AuditError::StaleImpact {
            sample_id: sample_before.id.clone(),
        });
    }

    let mut sample = edit.apply_to(sample_before);
    if retention == OrphanRetention::Discard {
        for key in &impact.removed_reqs {
            sample.requirement_results.remove(key);
        }
    }

    tracing::info!(
        sample_id = %sample.id,
        added = impact.added_reqs.len(),
        removed = impact.removed_reqs.len(),
        discarded = if retention == OrphanRetention::Discard {
            impact.lost_result_keys.len()
        } else {
            0
        },
        "committed sample edit"
    );
    Ok(sample)
}
