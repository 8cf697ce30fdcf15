//! Definition-level data-quality checks.
//!
//! Shapes that aggregate without error but probably do not mean what the
//! rule-file author intended.

use auditor_core::model::{DataQualityWarning, Requirement, RuleFile};

pub fn inspect_requirement(requirement: &Requirement) -> Vec<DataQualityWarning> {
    if requirement.checks.is_empty() {
        return vec![DataQualityWarning::RequirementWithoutChecks {
            requirement_key: requirement.key.clone(),
        }];
    }
    requirement
        .checks
        .iter()
        .filter(|check| check.pass_criteria.is_empty())
        .map(|check| DataQualityWarning::CheckWithoutPassCriteria {
            requirement_key: requirement.key.clone(),
            check_id: check.id.clone(),
        })
        .collect()
}

/// [`inspect_requirement`] over the whole rule file, logging each warning.
pub fn inspect_rule_file(rule_file: &RuleFile) -> Vec<DataQualityWarning> {
    let warnings: Vec<DataQualityWarning> = rule_file
        .requirements
        .iter()
        .flat_map(inspect_requirement)
        .collect();
    for warning in &warnings {
        tracing::warn!(warning = %warning.describe(), "rule file data quality");
    }
    warnings
}
