use std::collections::BTreeMap;

use auditor_core::model::{
    Check, CheckLogic, CheckOverallStatus, CheckResult, DataQualityWarning, DisplayStatus,
    PassCriterion, PassCriterionResult, PassCriterionStatus, Requirement, RequirementResult,
    RequirementStatus,
};
use auditor_core::normalize::normalize_audit_state;
use auditor_status::{
    calculate_check_status, calculate_requirement_status, display_status, inspect_requirement,
    inspect_rule_file, summarize_audit, summarize_sample,
};
use test_fixtures::{load_fixture_value, AUDIT_V1};

fn check(id: &str, logic: CheckLogic, criteria: usize) -> Check {
    Check {
        id: id.into(),
        condition: format!("condition {id}"),
        logic,
        pass_criteria: (1..=criteria)
            .map(|n| PassCriterion {
                id: n.to_string(),
                requirement: format!("criterion {n}"),
                failure_statement_template: String::new(),
            })
            .collect(),
    }
}

fn check_result(overall: CheckOverallStatus, criteria: &[PassCriterionStatus]) -> CheckResult {
    CheckResult {
        overall_status: overall,
        pass_criteria: criteria
            .iter()
            .enumerate()
            .map(|(i, status)| {
                (
                    (i + 1).to_string(),
                    PassCriterionResult {
                        status: *status,
                        ..PassCriterionResult::default()
                    },
                )
            })
            .collect(),
    }
}

fn result_with(checks: Vec<(&str, CheckResult)>) -> RequirementResult {
    RequirementResult {
        check_results: checks
            .into_iter()
            .map(|(id, r)| (id.to_string(), r))
            .collect::<BTreeMap<_, _>>(),
        ..RequirementResult::default()
    }
}

#[test]
fn missing_check_result_is_not_audited() {
    let c = check("1", CheckLogic::And, 2);
    assert_eq!(calculate_check_status(&c, None), RequirementStatus::NotAudited);
}

#[test]
fn does_not_comply_auto_passes_regardless_of_criteria() {
    let c = check("1", CheckLogic::And, 2);
    let r = check_result(
        CheckOverallStatus::NotApplicable,
        &[PassCriterionStatus::Failed, PassCriterionStatus::Failed],
    );
    assert_eq!(calculate_check_status(&c, Some(&r)), RequirementStatus::Passed);
}

#[test]
fn missing_criterion_result_counts_as_not_audited() {
    let c = check("1", CheckLogic::And, 2);
    let r = check_result(CheckOverallStatus::Passed, &[PassCriterionStatus::Passed]);
    assert_eq!(
        calculate_check_status(&c, Some(&r)),
        RequirementStatus::PartiallyAudited
    );
}

#[test]
fn or_check_passes_on_a_single_criterion() {
    let c = check("1", CheckLogic::Or, 2);
    let r = check_result(
        CheckOverallStatus::Passed,
        &[PassCriterionStatus::Failed, PassCriterionStatus::Passed],
    );
    assert_eq!(calculate_check_status(&c, Some(&r)), RequirementStatus::Passed);
}

#[test]
fn zero_criteria_check_passes_vacuously_and_is_flagged() {
    let requirement = Requirement {
        key: "R".into(),
        checks: vec![check("1", CheckLogic::And, 0)],
        ..Requirement::default()
    };
    let result = result_with(vec![("1", check_result(CheckOverallStatus::Passed, &[]))]);
    assert_eq!(
        calculate_requirement_status(&requirement, Some(&result)),
        RequirementStatus::Passed
    );
    assert_eq!(
        inspect_requirement(&requirement),
        vec![DataQualityWarning::CheckWithoutPassCriteria {
            requirement_key: "R".into(),
            check_id: "1".into(),
        }]
    );
}

#[test]
fn requirement_without_checks_is_never_audited() {
    let requirement = Requirement {
        key: "R".into(),
        ..Requirement::default()
    };
    assert_eq!(
        calculate_requirement_status(&requirement, Some(&RequirementResult::default())),
        RequirementStatus::NotAudited
    );
    assert_eq!(
        inspect_requirement(&requirement),
        vec![DataQualityWarning::RequirementWithoutChecks {
            requirement_key: "R".into()
        }]
    );
}

#[test]
fn requirement_roll_up_over_checks() {
    let requirement = Requirement {
        key: "R".into(),
        checks: vec![check("1", CheckLogic::And, 1), check("2", CheckLogic::And, 1)],
        ..Requirement::default()
    };
    let passed = check_result(CheckOverallStatus::Passed, &[PassCriterionStatus::Passed]);
    let failed = check_result(CheckOverallStatus::Passed, &[PassCriterionStatus::Failed]);

    let one_passed = result_with(vec![("1", passed.clone())]);
    assert_eq!(
        calculate_requirement_status(&requirement, Some(&one_passed)),
        RequirementStatus::PartiallyAudited
    );

    let both = result_with(vec![("1", passed.clone()), ("2", passed.clone())]);
    assert_eq!(
        calculate_requirement_status(&requirement, Some(&both)),
        RequirementStatus::Passed
    );

    let one_failed = result_with(vec![("1", passed), ("2", failed)]);
    assert_eq!(
        calculate_requirement_status(&requirement, Some(&one_failed)),
        RequirementStatus::Failed
    );

    assert_eq!(
        calculate_requirement_status(&requirement, None),
        RequirementStatus::NotAudited
    );
}

#[test]
fn pending_review_masks_display_status() {
    let requirement = Requirement {
        key: "R".into(),
        checks: vec![check("1", CheckLogic::And, 1)],
        ..Requirement::default()
    };
    let mut result = result_with(vec![(
        "1",
        check_result(CheckOverallStatus::Passed, &[PassCriterionStatus::Passed]),
    )]);
    assert_eq!(
        display_status(&requirement, Some(&result)),
        DisplayStatus::Passed
    );
    result.needs_review = true;
    assert_eq!(
        display_status(&requirement, Some(&result)),
        DisplayStatus::Updated
    );
    // Statistics still see the computed status.
    assert_eq!(
        calculate_requirement_status(&requirement, Some(&result)),
        RequirementStatus::Passed
    );
}

#[test]
fn end_to_end_universal_requirement_passes_with_and() {
    let state = normalize_audit_state(&load_fixture_value(AUDIT_V1)).unwrap();
    let requirement = state.rule_file_content.requirement("REQ-2").unwrap();
    let s1 = state.sample("S1").unwrap();
    assert_eq!(
        calculate_requirement_status(requirement, s1.result("REQ-2")),
        RequirementStatus::Passed
    );
}

#[test]
fn golden_audit_summary() {
    let state = normalize_audit_state(&load_fixture_value(AUDIT_V1)).unwrap();

    let s1 = summarize_sample(&state.rule_file_content, state.sample("S1").unwrap());
    assert_eq!(s1.counts.failed, 2);
    assert_eq!(s1.counts.passed, 1);
    assert_eq!(s1.status, RequirementStatus::Failed);

    let s2 = summarize_sample(&state.rule_file_content, state.sample("S2").unwrap());
    assert_eq!(s2.counts.partially_audited, 2);
    assert_eq!(s2.counts.passed, 1);
    assert_eq!(s2.status, RequirementStatus::PartiallyAudited);

    // S3's stored REQ-1 row is not relevant and is not counted.
    let s3 = summarize_sample(&state.rule_file_content, state.sample("S3").unwrap());
    assert_eq!(s3.counts.total(), 2);
    assert_eq!(s3.status, RequirementStatus::NotAudited);

    let audit = summarize_audit(&state);
    assert_eq!(audit.samples.len(), 3);
    assert_eq!(audit.totals.total(), 8);
    assert_eq!(audit.totals.needs_review, 0);
    assert_eq!(audit.status, RequirementStatus::Failed);
    assert!((audit.totals.progress() - 0.5).abs() < f64::EPSILON);
}

#[test]
fn golden_rule_file_is_clean() {
    let state = normalize_audit_state(&load_fixture_value(AUDIT_V1)).unwrap();
    assert!(inspect_rule_file(&state.rule_file_content).is_empty());
}
