use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::result::RequirementResult;
use super::{ContentTypeId, RequirementKey, SampleId};

/// A page or component under audit.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Sample {
    pub id: SampleId,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub sample_category: String,
    #[serde(default)]
    pub sample_type: String,
    /// Empty means no content-type filter has been chosen yet.
    #[serde(default)]
    pub selected_content_types: Vec<ContentTypeId>,
    #[serde(default)]
    pub requirement_results: BTreeMap<RequirementKey, RequirementResult>,
}

impl Sample {
    pub fn result(&self, key: &str) -> Option<&RequirementResult> {
        self.requirement_results.get(key)
    }

    /// Whether a stored result for `key` holds recorded findings.
    pub fn has_recorded_result(&self, key: &str) -> bool {
        self.result(key).is_some_and(|r| r.has_recorded_data())
    }
}

/// Proposed changes from the edit-sample form. `None` leaves a field as is.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct SampleEdit {
    #[ts(optional)]
    pub description: Option<String>,
    #[ts(optional)]
    pub url: Option<String>,
    #[ts(optional)]
    pub sample_category: Option<String>,
    #[ts(optional)]
    pub sample_type: Option<String>,
    #[ts(optional)]
    pub selected_content_types: Option<Vec<ContentTypeId>>,
}

impl SampleEdit {
    /// Only the content-type selection changes.
    pub fn content_types<I, S>(content_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            selected_content_types: Some(content_types.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    /// The sample as it would look after this edit. Results are untouched.
    pub fn apply_to(&self, sample: &Sample) -> Sample {
        let mut merged = sample.clone();
        if let Some(description) = &self.description {
            merged.description = description.clone();
        }
        if let Some(url) = &self.url {
            merged.url = url.clone();
        }
        if let Some(category) = &self.sample_category {
            merged.sample_category = category.clone();
        }
        if let Some(sample_type) = &self.sample_type {
            merged.sample_type = sample_type.clone();
        }
        if let Some(content_types) = &self.selected_content_types {
            merged.selected_content_types = content_types.clone();
        }
        merged
    }
}
