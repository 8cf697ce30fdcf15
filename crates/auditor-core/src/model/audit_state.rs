use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::rule_file::RuleFile;
use super::sample::Sample;
use super::{RequirementKey, SampleId};

/// Record of a result the reconciler dropped because its requirement was
/// removed from the rule file, or was never in it. Never carries result data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Tombstone {
    pub sample_id: SampleId,
    pub requirement_key: RequirementKey,
    pub title: String,
    /// Version of the rule file that removed the requirement.
    pub rule_file_version: String,
}

/// The audit as the engine sees it: the active rule file and the samples.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct AuditState {
    pub rule_file_content: RuleFile,
    #[serde(default)]
    pub samples: Vec<Sample>,
    /// Append-only history of dropped results across every rule-file
    /// update. Never trimmed by the engine; the host owns retention.
    #[serde(default)]
    pub tombstones: Vec<Tombstone>,
}

impl AuditState {
    pub fn new(rule_file_content: RuleFile, samples: Vec<Sample>) -> Self {
        Self {
            rule_file_content,
            samples,
            tombstones: Vec::new(),
        }
    }

    pub fn sample(&self, id: &str) -> Option<&Sample> {
        self.samples.iter().find(|s| s.id == id)
    }

    /// Result keys with no requirement in the active rule file, per sample.
    pub fn orphaned_result_keys(&self) -> Vec<(&str, &str)> {
        self.samples
            .iter()
            .flat_map(|sample| {
                sample
                    .requirement_results
                    .keys()
                    .filter(|key| !self.rule_file_content.contains(key))
                    .map(move |key| (sample.id.as_str(), key.as_str()))
            })
            .collect()
    }
}
