//! blake3 content fingerprints.
//!
//! A requirement fingerprint covers only the audit-relevant fields: the
//! content-type scope (as a set) and, in order, each check's id, condition,
//! logic and pass criteria. Title, standard reference, info blocks and
//! metadata are cosmetic and excluded. Fields are fed length-prefixed so the
//! hash is independent of any serializer's property ordering.

use std::collections::BTreeSet;

use blake3::Hasher;

use crate::model::{Check, Requirement, RuleFile};

fn update_field(hasher: &mut Hasher, value: &str) {
    hasher.update(&(value.len() as u64).to_le_bytes());
    hasher.update(value.as_bytes());
}

fn update_count(hasher: &mut Hasher, count: usize) {
    hasher.update(&(count as u64).to_le_bytes());
}

/// Content types as a normalized set: trimmed, deduplicated, sorted.
pub fn normalized_content_types(requirement: &Requirement) -> BTreeSet<&str> {
    requirement
        .content_type
        .iter()
        .map(|ct| ct.trim())
        .filter(|ct| !ct.is_empty())
        .collect()
}

fn hash_check(hasher: &mut Hasher, check: &Check) {
    update_field(hasher, &check.id);
    update_field(hasher, check.condition.trim());
    update_field(hasher, check.logic.as_str());
    update_count(hasher, check.pass_criteria.len());
    for pc in &check.pass_criteria {
        update_field(hasher, &pc.id);
        update_field(hasher, pc.requirement.trim());
        update_field(hasher, pc.failure_statement_template.trim());
    }
}

/// Fingerprint of the content-type scope alone.
pub fn scope_fingerprint(requirement: &Requirement) -> String {
    let mut hasher = Hasher::new();
    let scope = normalized_content_types(requirement);
    update_count(&mut hasher, scope.len());
    for content_type in scope {
        update_field(&mut hasher, content_type);
    }
    hasher.finalize().to_hex().to_string()
}

/// Fingerprint of one check.
pub fn check_fingerprint(check: &Check) -> String {
    let mut hasher = Hasher::new();
    hash_check(&mut hasher, check);
    hasher.finalize().to_hex().to_string()
}

/// Fingerprint of everything about a requirement that affects its results.
pub fn requirement_fingerprint(requirement: &Requirement) -> String {
    let mut hasher = Hasher::new();
    update_field(&mut hasher, &scope_fingerprint(requirement));
    update_count(&mut hasher, requirement.checks.len());
    for check in &requirement.checks {
        hash_check(&mut hasher, check);
    }
    hasher.finalize().to_hex().to_string()
}

/// Identity of a whole rule file: version, plus every requirement's key,
/// title and content fingerprint in declaration order.
pub fn rule_file_fingerprint(rule_file: &RuleFile) -> String {
    let mut hasher = Hasher::new();
    update_field(&mut hasher, rule_file.version());
    update_count(&mut hasher, rule_file.requirements.len());
    for requirement in &rule_file.requirements {
        update_field(&mut hasher, &requirement.key);
        update_field(&mut hasher, &requirement.title);
        update_field(&mut hasher, &requirement_fingerprint(requirement));
    }
    hasher.finalize().to_hex().to_string()
}
