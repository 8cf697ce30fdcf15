//! The change report shown to the auditor before a rule-file update.

use std::fmt;

use auditor_core::model::{CheckId, RequirementKey, SampleId};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Which audit-relevant part of a requirement changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChangeAspect {
    /// The content-type scope changed (as a set).
    ContentTypes,
    CheckAdded { check_id: CheckId },
    CheckRemoved { check_id: CheckId },
    /// Same checks, different order.
    CheckOrder,
    Condition { check_id: CheckId },
    Logic { check_id: CheckId },
    /// Pass-criterion text, count, ids or order changed.
    PassCriteria { check_id: CheckId },
}

impl fmt::Display for ChangeAspect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChangeAspect::ContentTypes => write!(f, "content types"),
            ChangeAspect::CheckAdded { check_id } => write!(f, "check {check_id} added"),
            ChangeAspect::CheckRemoved { check_id } => write!(f, "check {check_id} removed"),
            ChangeAspect::CheckOrder => write!(f, "check order"),
            ChangeAspect::Condition { check_id } => write!(f, "condition of check {check_id}"),
            ChangeAspect::Logic { check_id } => write!(f, "logic of check {check_id}"),
            ChangeAspect::PassCriteria { check_id } => {
                write!(f, "pass criteria of check {check_id}")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct AddedRequirement {
    pub key: RequirementKey,
    pub id: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct UpdatedRequirement {
    pub key: RequirementKey,
    pub id: String,
    /// Title from the new definition.
    pub title: String,
    pub aspects: Vec<ChangeAspect>,
    /// Samples holding a result for this key; each will be flagged for review.
    pub affected_sample_ids: Vec<SampleId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct RemovedRequirement {
    pub key: RequirementKey,
    /// Id and title from the old definition.
    pub id: String,
    pub title: String,
    /// Samples whose recorded results will be deleted.
    pub affected_sample_ids: Vec<SampleId>,
}

/// A stored result the update touches although no requirement change
/// names it: its key is unknown to the old rule file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ResultRef {
    pub sample_id: SampleId,
    pub requirement_key: RequirementKey,
    pub has_recorded_data: bool,
}

impl fmt::Display for ResultRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.sample_id, self.requirement_key)
    }
}

/// Difference between the active rule file and a candidate replacement.
///
/// Bound to the exact pair it was computed from through the two blake3
/// fingerprints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ChangeReport {
    pub from_version: String,
    pub to_version: String,
    pub base_fingerprint: String,
    pub target_fingerprint: String,
    pub added_requirements: Vec<AddedRequirement>,
    pub updated_requirements: Vec<UpdatedRequirement>,
    pub removed_requirements: Vec<RemovedRequirement>,
    /// Results under keys neither rule file defines. Deleted on apply.
    #[serde(default)]
    pub orphaned_results: Vec<ResultRef>,
    /// Results under keys only the new rule file defines. Flagged on apply.
    #[serde(default)]
    pub reappearing_results: Vec<ResultRef>,
}

impl ChangeReport {
    /// Applying the update changes nothing.
    pub fn is_empty(&self) -> bool {
        self.added_requirements.is_empty()
            && self.updated_requirements.is_empty()
            && self.removed_requirements.is_empty()
            && self.orphaned_results.is_empty()
            && self.reappearing_results.is_empty()
    }

    /// Applying the update deletes recorded results.
    pub fn data_will_be_lost(&self) -> bool {
        self.removed_requirements
            .iter()
            .any(|r| !r.affected_sample_ids.is_empty())
            || self.orphaned_results.iter().any(|r| r.has_recorded_data)
    }

    /// Results that will be flagged for review.
    pub fn flagged_result_count(&self) -> usize {
        self.updated_requirements
            .iter()
            .map(|r| r.affected_sample_ids.len())
            .sum::<usize>()
            + self.reappearing_results.len()
    }
}

impl fmt::Display for ChangeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rule file update {} -> {}", self.from_version, self.to_version)?;
        if self.is_empty() {
            return write!(f, ": no requirement changes");
        }
        writeln!(f)?;
        writeln!(f, "  added: {}", self.added_requirements.len())?;
        for added in &self.added_requirements {
            writeln!(f, "    {} {}", added.id, added.title)?;
        }
        writeln!(f, "  updated: {}", self.updated_requirements.len())?;
        for updated in &self.updated_requirements {
            let aspects: Vec<String> = updated.aspects.iter().map(ToString::to_string).collect();
            write!(f, "    {} {} ({})", updated.id, updated.title, aspects.join(", "))?;
            if !updated.affected_sample_ids.is_empty() {
                write!(
                    f,
                    "; review needed on {}",
                    updated.affected_sample_ids.join(", ")
                )?;
            }
            writeln!(f)?;
        }
        write!(f, "  removed: {}", self.removed_requirements.len())?;
        for removed in &self.removed_requirements {
            write!(f, "\n    {} {}", removed.id, removed.title)?;
            if !removed.affected_sample_ids.is_empty() {
                write!(
                    f,
                    "; results deleted on {}",
                    removed.affected_sample_ids.join(", ")
                )?;
            }
        }
        if !self.orphaned_results.is_empty() {
            write!(f, "\n  orphaned results deleted: {}", join(&self.orphaned_results))?;
        }
        if !self.reappearing_results.is_empty() {
            write!(
                f,
                "\n  results under new keys flagged: {}",
                join(&self.reappearing_results)
            )?;
        }
        Ok(())
    }
}

fn join(results: &[ResultRef]) -> String {
    results
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
