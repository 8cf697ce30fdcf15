//! Relevance resolver.

use auditor_core::model::{ContentTypeId, Requirement, RequirementKey, RuleFile, Sample};
use auditor_observability::relevance_span;

/// Whether `requirement` applies to a sample with `selected` content types.
///
/// An empty selection means no filter has been chosen yet, so everything is
/// relevant. A requirement without content types applies universally.
pub fn is_requirement_relevant(requirement: &Requirement, selected: &[ContentTypeId]) -> bool {
    if selected.is_empty() || requirement.is_universal() {
        return true;
    }
    requirement
        .content_type
        .iter()
        .any(|content_type| selected.iter().any(|s| s == content_type))
}

/// Requirements relevant to `sample`, in rule-file declaration order.
pub fn get_relevant_requirements<'a>(
    rule_file: &'a RuleFile,
    sample: &Sample,
) -> Vec<&'a Requirement> {
    let _span = relevance_span!(sample.id).entered();
    let relevant: Vec<&Requirement> = rule_file
        .requirements
        .iter()
        .filter(|requirement| is_requirement_relevant(requirement, &sample.selected_content_types))
        .collect();
    tracing::debug!(
        relevant = relevant.len(),
        total = rule_file.requirements.len(),
        "resolved relevant requirements"
    );
    relevant
}

/// Keys of [`get_relevant_requirements`], same order.
pub fn relevant_requirement_keys(rule_file: &RuleFile, sample: &Sample) -> Vec<RequirementKey> {
    get_relevant_requirements(rule_file, sample)
        .into_iter()
        .map(|requirement| requirement.key.clone())
        .collect()
}
