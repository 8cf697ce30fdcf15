//! Schema migration at the persistence boundary.
//!
//! Audit files are long-lived and have gone through several shapes. These
//! functions take loosely-typed JSON and produce the canonical records the
//! engine works on. Everything except a missing requirements collection is
//! recovered: absent or mistyped fields become their defaults.

use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use crate::constants::{FALLBACK_REQUIREMENT_KEY_PREFIX, FALLBACK_SAMPLE_ID_PREFIX};
use crate::errors::RuleFileError;
use crate::model::{
    AuditState, Check, CheckLogic, CheckOverallStatus, CheckResult, ContentTypeDefinition,
    PassCriterion, PassCriterionResult, PassCriterionStatus, Requirement, RequirementResult,
    RequirementStatus, RuleFile, RuleFileMetadata, Sample, SampleCategory, SampleTypeDefinition,
    Tombstone,
};

/// Strings and numbers both count as text; ids are often numeric in old files.
fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn text_field(object: &Map<String, Value>, field: &str) -> String {
    object.get(field).and_then(as_text).unwrap_or_default()
}

fn non_empty_text(object: &Map<String, Value>, field: &str) -> Option<String> {
    object
        .get(field)
        .and_then(as_text)
        .filter(|s| !s.trim().is_empty())
}

/// A list of ids. Non-arrays are empty; non-text entries are skipped.
fn id_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(as_text)
            .filter(|s| !s.trim().is_empty())
            .collect(),
        _ => Vec::new(),
    }
}

/// Entries of a collection stored either as an array or as an id-keyed object.
fn entries(value: Option<&Value>) -> Vec<(Option<&str>, &Value)> {
    match value {
        Some(Value::Array(items)) => items.iter().map(|v| (None, v)).collect(),
        Some(Value::Object(map)) => map.iter().map(|(k, v)| (Some(k.as_str()), v)).collect(),
        _ => Vec::new(),
    }
}

fn describe(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => "nothing".to_string(),
        Some(Value::Bool(_)) => "a boolean".to_string(),
        Some(Value::Number(_)) => "a number".to_string(),
        Some(Value::String(_)) => "a string".to_string(),
        Some(Value::Array(_)) => "an array".to_string(),
        Some(Value::Object(_)) => "an object".to_string(),
    }
}

fn named_entries(value: Option<&Value>) -> Vec<(String, String, Option<&Map<String, Value>>)> {
    entries(value)
        .into_iter()
        .filter_map(|(map_key, entry)| match entry {
            Value::Object(object) => {
                let id = non_empty_text(object, "id").or_else(|| map_key.map(str::to_string))?;
                Some((id, text_field(object, "name"), Some(object)))
            }
            // `{ "image": "Images" }` or `["image"]`.
            other => {
                let text = as_text(other)?;
                match map_key {
                    Some(id) => Some((id.to_string(), text, None)),
                    None => Some((text.clone(), text, None)),
                }
            }
        })
        .collect()
}

fn normalize_metadata(value: Option<&Value>) -> RuleFileMetadata {
    let Some(Value::Object(object)) = value else {
        return RuleFileMetadata::default();
    };

    let content_types = named_entries(
        object
            .get("contentTypes")
            .or_else(|| object.get("vocabularies").and_then(|v| v.get("contentTypes"))),
    )
    .into_iter()
    .map(|(id, name, _)| ContentTypeDefinition { id, name })
    .collect();

    let sample_categories = named_entries(object.get("sampleCategories"))
        .into_iter()
        .map(|(id, name, fields)| SampleCategory {
            id,
            name,
            sample_types: named_entries(fields.and_then(|f| f.get("sampleTypes")))
                .into_iter()
                .map(|(id, name, _)| SampleTypeDefinition { id, name })
                .collect(),
        })
        .collect();

    let block_orders = match object.get("blockOrders") {
        Some(Value::Object(map)) => map
            .iter()
            .map(|(view, order)| (view.clone(), id_list(Some(order))))
            .collect(),
        _ => BTreeMap::new(),
    };

    RuleFileMetadata {
        title: text_field(object, "title"),
        version: text_field(object, "version"),
        language: text_field(object, "language"),
        content_types,
        sample_categories,
        block_orders,
    }
}

fn normalize_pass_criterion(map_key: Option<&str>, value: &Value, index: usize) -> PassCriterion {
    let fallback_id = || map_key.map(str::to_string).unwrap_or_else(|| (index + 1).to_string());
    match value {
        Value::Object(object) => PassCriterion {
            id: non_empty_text(object, "id").unwrap_or_else(fallback_id),
            requirement: text_field(object, "requirement"),
            failure_statement_template: text_field(object, "failureStatementTemplate"),
        },
        // Legacy files stored the criterion text directly.
        other => PassCriterion {
            id: fallback_id(),
            requirement: as_text(other).unwrap_or_default(),
            failure_statement_template: String::new(),
        },
    }
}

fn normalize_check(map_key: Option<&str>, value: &Value, index: usize) -> Option<Check> {
    let Value::Object(object) = value else {
        tracing::warn!(index, "skipping check that is not an object");
        return None;
    };
    let pass_criteria = entries(
        object
            .get("passCriteria")
            .or_else(|| object.get("criteria")),
    )
    .into_iter()
    .enumerate()
    .map(|(i, (key, pc))| normalize_pass_criterion(key, pc, i))
    .collect();

    Some(Check {
        id: non_empty_text(object, "id")
            .or_else(|| map_key.map(str::to_string))
            .unwrap_or_else(|| (index + 1).to_string()),
        condition: text_field(object, "condition"),
        logic: object
            .get("logic")
            .and_then(Value::as_str)
            .and_then(CheckLogic::parse)
            .unwrap_or_default(),
        pass_criteria,
    })
}

/// Key resolution order: `key`, `id`, the key of the enclosing object,
/// then `requirement-<index>`.
fn normalize_requirement(
    map_key: Option<&str>,
    value: &Value,
    index: usize,
) -> Option<Requirement> {
    let Value::Object(object) = value else {
        tracing::warn!(index, "skipping requirement that is not an object");
        return None;
    };
    let key = non_empty_text(object, "key")
        .or_else(|| non_empty_text(object, "id"))
        .or_else(|| map_key.map(str::to_string))
        .unwrap_or_else(|| format!("{FALLBACK_REQUIREMENT_KEY_PREFIX}{index}"));

    let checks = entries(object.get("checks").or_else(|| object.get("outline")))
        .into_iter()
        .enumerate()
        .filter_map(|(i, (check_key, check))| normalize_check(check_key, check, i))
        .collect();

    let info_blocks = match object.get("infoBlocks") {
        Some(Value::Object(map)) => map
            .iter()
            .filter_map(|(name, text)| as_text(text).map(|t| (name.clone(), t)))
            .collect(),
        _ => BTreeMap::new(),
    };

    Some(Requirement {
        key,
        id: text_field(object, "id"),
        title: text_field(object, "title"),
        standard_reference: match object.get("standardReference") {
            Some(Value::Object(reference)) => text_field(reference, "text"),
            Some(other) => as_text(other).unwrap_or_default(),
            None => String::new(),
        },
        content_type: id_list(object.get("contentType")),
        checks,
        info_blocks,
        metadata: object.get("metadata").cloned().unwrap_or(Value::Null),
    })
}

fn decode_rule_file(value: &Value) -> Result<RuleFile, RuleFileError> {
    let object = value.as_object().ok_or(RuleFileError::NotAnObject)?;
    let raw = object.get("requirements");
    let requirements: Vec<Requirement> = match raw {
        Some(Value::Array(_)) | Some(Value::Object(_)) => entries(raw)
            .into_iter()
            .enumerate()
            .filter_map(|(i, (key, requirement))| normalize_requirement(key, requirement, i))
            .collect(),
        other => {
            return Err(RuleFileError::MissingRequirements {
                found: describe(other),
            })
        }
    };

    let rule_file = RuleFile {
        metadata: normalize_metadata(object.get("metadata")),
        requirements,
    };
    tracing::debug!(
        requirements = rule_file.requirements.len(),
        version = %rule_file.metadata.version,
        "normalized rule file"
    );
    Ok(rule_file)
}

/// Normalize a rule file offered as a replacement.
///
/// Fails when the document is not an object, has no requirements
/// collection, or does not pass [`RuleFile::validate`].
pub fn normalize_rule_file(value: &Value) -> Result<RuleFile, RuleFileError> {
    let rule_file = decode_rule_file(value)?;
    rule_file.validate()?;
    Ok(rule_file)
}

/// Rename repeated keys to `<key>-<index>` so every requirement stays
/// addressable. Results stored under the original key keep pointing at its
/// first occurrence.
fn make_keys_unique(rule_file: &mut RuleFile) {
    let mut seen: HashSet<String> = HashSet::with_capacity(rule_file.requirements.len());
    for (index, requirement) in rule_file.requirements.iter_mut().enumerate() {
        if seen.insert(requirement.key.clone()) {
            continue;
        }
        let mut suffix = index;
        let mut candidate = format!("{}-{suffix}", requirement.key);
        while seen.contains(&candidate) {
            suffix += 1;
            candidate = format!("{}-{suffix}", requirement.key);
        }
        tracing::warn!(
            key = %requirement.key,
            renamed = %candidate,
            "duplicate requirement key in stored rule file"
        );
        seen.insert(candidate.clone());
        requirement.key = candidate;
    }
}

fn parse_requirement_status(value: Option<&Value>) -> RequirementStatus {
    match value.and_then(Value::as_str).unwrap_or_default() {
        "passed" => RequirementStatus::Passed,
        "failed" => RequirementStatus::Failed,
        "partially_audited" | "partiallyAudited" => RequirementStatus::PartiallyAudited,
        _ => RequirementStatus::NotAudited,
    }
}

fn parse_overall_status(value: Option<&Value>) -> CheckOverallStatus {
    match value.and_then(Value::as_str).unwrap_or_default() {
        "passed" | "complies" => CheckOverallStatus::Passed,
        "not_applicable" | "notApplicable" | "does_not_comply" => {
            CheckOverallStatus::NotApplicable
        }
        _ => CheckOverallStatus::NotAudited,
    }
}

fn parse_pc_status(value: Option<&Value>) -> PassCriterionStatus {
    match value.and_then(Value::as_str).unwrap_or_default() {
        "passed" => PassCriterionStatus::Passed,
        "failed" => PassCriterionStatus::Failed,
        _ => PassCriterionStatus::NotAudited,
    }
}

fn parse_timestamp(value: Option<&Value>) -> Option<DateTime<Utc>> {
    let raw = value.and_then(Value::as_str)?;
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .ok()
}

fn object_entries(value: Option<&Value>) -> impl Iterator<Item = (&String, &Map<String, Value>)> {
    value
        .and_then(Value::as_object)
        .into_iter()
        .flat_map(|map| map.iter())
        .filter_map(|(key, entry)| entry.as_object().map(|object| (key, object)))
}

fn normalize_check_result(object: &Map<String, Value>) -> CheckResult {
    CheckResult {
        overall_status: parse_overall_status(object.get("overallStatus")),
        pass_criteria: object_entries(object.get("passCriteria"))
            .map(|(id, pc)| {
                (
                    id.clone(),
                    PassCriterionResult {
                        status: parse_pc_status(pc.get("status")),
                        observation_detail: text_field(pc, "observationDetail"),
                        stuck_problem_description: text_field(pc, "stuckProblemDescription"),
                    },
                )
            })
            .collect(),
    }
}

fn normalize_requirement_result(object: &Map<String, Value>) -> RequirementResult {
    RequirementResult {
        status: parse_requirement_status(object.get("status")),
        needs_review: object
            .get("needsReview")
            .and_then(Value::as_bool)
            .unwrap_or(false),
        actual_observation: text_field(object, "actualObservation"),
        comment_to_auditor: text_field(object, "commentToAuditor"),
        comment_to_actor: text_field(object, "commentToActor"),
        last_status_update: parse_timestamp(object.get("lastStatusUpdate")),
        check_results: object_entries(object.get("checkResults"))
            .map(|(id, check)| (id.clone(), normalize_check_result(check)))
            .collect(),
    }
}

/// Normalize a persisted sample. Never fails.
pub fn normalize_sample(value: &Value) -> Sample {
    let Some(object) = value.as_object() else {
        return Sample::default();
    };
    Sample {
        id: text_field(object, "id"),
        description: text_field(object, "description"),
        url: text_field(object, "url"),
        sample_category: text_field(object, "sampleCategory"),
        sample_type: text_field(object, "sampleType"),
        selected_content_types: id_list(object.get("selectedContentTypes")),
        requirement_results: object_entries(object.get("requirementResults"))
            .map(|(key, result)| (key.clone(), normalize_requirement_result(result)))
            .collect(),
    }
}

/// Normalize a persisted audit. Samples without an id get `sample-<n>`.
///
/// The stored rule file is not held to [`RuleFile::validate`]: repeated keys
/// are renamed instead, so an existing audit always loads.
pub fn normalize_audit_state(value: &Value) -> Result<AuditState, RuleFileError> {
    let object = value.as_object().ok_or(RuleFileError::NotAnObject)?;
    let rule_file_value = object
        .get("ruleFileContent")
        .or_else(|| object.get("ruleFile"))
        .ok_or_else(|| RuleFileError::MissingRequirements {
            found: "no rule file".to_string(),
        })?;
    let mut rule_file_content = decode_rule_file(rule_file_value)?;
    make_keys_unique(&mut rule_file_content);

    let samples = match object.get("samples") {
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let mut sample = normalize_sample(item);
                if sample.id.trim().is_empty() {
                    sample.id = format!("{FALLBACK_SAMPLE_ID_PREFIX}{}", i + 1);
                }
                sample
            })
            .collect(),
        _ => Vec::new(),
    };

    let tombstones = match object.get("tombstones") {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| serde_json::from_value::<Tombstone>(item.clone()).ok())
            .collect(),
        _ => Vec::new(),
    };

    Ok(AuditState {
        rule_file_content,
        samples,
        tombstones,
    })
}
