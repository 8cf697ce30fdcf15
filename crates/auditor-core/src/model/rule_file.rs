use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::status::CheckLogic;
use super::{CheckId, ContentTypeId, PassCriterionId, RequirementKey};
use crate::errors::RuleFileError;

/// An entry of the content-type vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ContentTypeDefinition {
    pub id: ContentTypeId,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SampleTypeDefinition {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SampleCategory {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub sample_types: Vec<SampleTypeDefinition>,
}

/// Rule file vocabularies and versioning.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct RuleFileMetadata {
    pub title: String,
    pub version: String,
    pub language: String,
    pub content_types: Vec<ContentTypeDefinition>,
    pub sample_categories: Vec<SampleCategory>,
    /// Display ordering of info blocks per view. Cosmetic.
    pub block_orders: BTreeMap<String, Vec<String>>,
}

/// A single testable criterion of a check.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PassCriterion {
    pub id: PassCriterionId,
    #[serde(default)]
    pub requirement: String,
    #[serde(default)]
    pub failure_statement_template: String,
}

/// A condition plus the pass criteria that apply when it holds.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Check {
    pub id: CheckId,
    #[serde(default)]
    pub condition: String,
    #[serde(default)]
    pub logic: CheckLogic,
    #[serde(default)]
    pub pass_criteria: Vec<PassCriterion>,
}

impl Check {
    pub fn pass_criterion(&self, id: &str) -> Option<&PassCriterion> {
        self.pass_criteria.iter().find(|pc| pc.id == id)
    }
}

/// A requirement of the rule file.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Requirement {
    /// Stable key used to index results.
    pub key: RequirementKey,
    /// Human-facing identifier (e.g. "1.1.1a").
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub standard_reference: String,
    /// Content types this requirement is scoped to. Empty = universal.
    #[serde(default)]
    pub content_type: Vec<ContentTypeId>,
    #[serde(default)]
    pub checks: Vec<Check>,
    #[serde(default)]
    pub info_blocks: BTreeMap<String, String>,
    #[serde(default)]
    pub metadata: serde_json::Value,
}

impl Requirement {
    pub fn check(&self, id: &str) -> Option<&Check> {
        self.checks.iter().find(|c| c.id == id)
    }

    /// Whether the requirement applies regardless of content type.
    pub fn is_universal(&self) -> bool {
        self.content_type.is_empty()
    }

    /// Identifier shown to users: `id` when present, otherwise the key.
    pub fn display_id(&self) -> &str {
        if self.id.is_empty() {
            &self.key
        } else {
            &self.id
        }
    }
}

/// A complete rule file. Requirements are kept in declaration order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct RuleFile {
    #[serde(default)]
    pub metadata: RuleFileMetadata,
    pub requirements: Vec<Requirement>,
}

impl RuleFile {
    pub fn requirement(&self, key: &str) -> Option<&Requirement> {
        self.requirements.iter().find(|r| r.key == key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.requirement(key).is_some()
    }

    /// Requirement keys in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.requirements.iter().map(|r| r.key.as_str())
    }

    pub fn version(&self) -> &str {
        &self.metadata.version
    }

    /// Reject rule files whose key space cannot index results.
    pub fn validate(&self) -> Result<(), RuleFileError> {
        let mut seen = HashSet::with_capacity(self.requirements.len());
        for (index, requirement) in self.requirements.iter().enumerate() {
            if requirement.key.trim().is_empty() {
                return Err(RuleFileError::EmptyKey { index });
            }
            if !seen.insert(requirement.key.as_str()) {
                return Err(RuleFileError::DuplicateKey {
                    key: requirement.key.clone(),
                });
            }
        }
        Ok(())
    }
}
