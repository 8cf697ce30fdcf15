use std::collections::HashMap;

use auditor_core::model::{RequirementKey, SampleId};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::collector::ProblemItem;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProblemGroupKey {
    pub requirement_key: RequirementKey,
    pub sample_id: SampleId,
}

impl ProblemGroupKey {
    pub fn of(item: &ProblemItem) -> Self {
        Self {
            requirement_key: item.requirement_key.clone(),
            sample_id: item.sample_id.clone(),
        }
    }
}

/// Problems of one requirement on one sample.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProblemGroup {
    pub key: ProblemGroupKey,
    pub requirement_title: String,
    pub sample_description: String,
    pub items: Vec<ProblemItem>,
}

/// Group by `(requirement, sample)`. Groups are ordered by first appearance
/// in `items`; items keep their relative order inside a group.
pub fn group_problems(items: &[ProblemItem]) -> Vec<ProblemGroup> {
    let mut groups: Vec<ProblemGroup> = Vec::new();
    let mut index: HashMap<ProblemGroupKey, usize> = HashMap::new();

    for item in items {
        let key = ProblemGroupKey::of(item);
        let slot = *index.entry(key.clone()).or_insert_with(|| {
            groups.push(ProblemGroup {
                key,
                requirement_title: item.requirement_title.clone(),
                sample_description: item.sample_description.clone(),
                items: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].items.push(item.clone());
    }
    groups
}
