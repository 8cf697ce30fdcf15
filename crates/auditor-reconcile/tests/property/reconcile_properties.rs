use std::collections::BTreeMap;

use auditor_core::model::{
    AuditState, Check, CheckLogic, CheckOverallStatus, CheckResult, PassCriterion, Requirement,
    RequirementResult, RuleFile, RuleFileMetadata, Sample,
};
use auditor_reconcile::{analyze_rule_file_changes, apply_rule_file_update};
use proptest::prelude::*;

const KEYS: [&str; 6] = ["R0", "R1", "R2", "R3", "R4", "R5"];
const CONTENT_TYPES: [&str; 3] = ["image", "text", "form"];

fn requirement_strategy(key: &'static str) -> impl Strategy<Value = Requirement> {
    (
        proptest::sample::subsequence(CONTENT_TYPES.to_vec(), 0..=CONTENT_TYPES.len()),
        any::<bool>(),
        0usize..3,
    )
        .prop_map(move |(content_type, or, criteria)| Requirement {
            key: key.to_string(),
            title: format!("Requirement {key}"),
            content_type: content_type.into_iter().map(str::to_string).collect(),
            checks: vec![Check {
                id: "1".into(),
                condition: "Condition".into(),
                logic: if or { CheckLogic::Or } else { CheckLogic::And },
                pass_criteria: (0..criteria)
                    .map(|i| PassCriterion {
                        id: i.to_string(),
                        requirement: format!("Criterion {i}"),
                        failure_statement_template: String::new(),
                    })
                    .collect(),
            }],
            ..Requirement::default()
        })
}

fn rule_file_strategy(version: &'static str) -> impl Strategy<Value = RuleFile> {
    proptest::sample::subsequence(KEYS.to_vec(), 0..=KEYS.len())
        .prop_flat_map(|keys| {
            keys.into_iter()
                .map(requirement_strategy)
                .collect::<Vec<_>>()
        })
        .prop_map(move |requirements| RuleFile {
            metadata: RuleFileMetadata {
                version: version.to_string(),
                ..RuleFileMetadata::default()
            },
            requirements,
        })
}

fn result(recorded: bool) -> RequirementResult {
    if !recorded {
        return RequirementResult::default();
    }
    let mut check_results = BTreeMap::new();
    check_results.insert(
        "1".to_string(),
        CheckResult {
            overall_status: CheckOverallStatus::NotApplicable,
            ..CheckResult::default()
        },
    );
    RequirementResult {
        check_results,
        ..RequirementResult::default()
    }
}

fn samples_strategy() -> impl Strategy<Value = Vec<Sample>> {
    let key = prop_oneof![proptest::sample::select(KEYS.to_vec()), Just("ORPHAN")];
    proptest::collection::vec(
        proptest::collection::btree_map(key, any::<bool>(), 0..6),
        0..4,
    )
    .prop_map(|samples| {
        samples
            .into_iter()
            .enumerate()
            .map(|(i, results)| Sample {
                id: format!("S{i}"),
                requirement_results: results
                    .into_iter()
                    .map(|(key, recorded)| (key.to_string(), result(recorded)))
                    .collect(),
                ..Sample::default()
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn applying_twice_equals_applying_once(
        old in rule_file_strategy("1"),
        new in rule_file_strategy("2"),
        samples in samples_strategy(),
    ) {
        let state = AuditState::new(old, samples);
        let report = analyze_rule_file_changes(&state, &new);
        let once = apply_rule_file_update(&state, &new, &report).unwrap();

        let second_report = analyze_rule_file_changes(&once, &new);
        prop_assert!(second_report.is_empty());
        let twice = apply_rule_file_update(&once, &new, &second_report).unwrap();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn every_kept_result_has_a_requirement(
        old in rule_file_strategy("1"),
        new in rule_file_strategy("2"),
        samples in samples_strategy(),
    ) {
        let state = AuditState::new(old, samples);
        let report = analyze_rule_file_changes(&state, &new);
        let next = apply_rule_file_update(&state, &new, &report).unwrap();
        prop_assert!(next.orphaned_result_keys().is_empty());

        let before: usize = state.samples.iter().map(|s| s.requirement_results.len()).sum();
        let after: usize = next.samples.iter().map(|s| s.requirement_results.len()).sum();
        prop_assert_eq!(before, after + next.tombstones.len());
    }

    #[test]
    fn unchanged_requirements_are_carried_verbatim(
        old in rule_file_strategy("1"),
        new in rule_file_strategy("2"),
        samples in samples_strategy(),
    ) {
        let state = AuditState::new(old, samples);
        let report = analyze_rule_file_changes(&state, &new);
        let next = apply_rule_file_update(&state, &new, &report).unwrap();

        for (before, after) in state.samples.iter().zip(&next.samples) {
            for (key, result) in &before.requirement_results {
                let touched = report.updated_requirements.iter().any(|r| &r.key == key)
                    || report.removed_requirements.iter().any(|r| &r.key == key)
                    || !state.rule_file_content.contains(key);
                if !touched {
                    prop_assert_eq!(after.result(key), Some(result));
                }
            }
        }
    }

    #[test]
    fn every_changed_result_is_named_in_the_report(
        old in rule_file_strategy("1"),
        new in rule_file_strategy("2"),
        samples in samples_strategy(),
    ) {
        let state = AuditState::new(old, samples);
        let report = analyze_rule_file_changes(&state, &new);
        let next = apply_rule_file_update(&state, &new, &report).unwrap();

        let named = |sample_id: &str, key: &str| {
            report.updated_requirements.iter().any(|r| {
                r.key == key && r.affected_sample_ids.iter().any(|id| id == sample_id)
            }) || report.removed_requirements.iter().any(|r| r.key == key)
                || report
                    .orphaned_results
                    .iter()
                    .chain(&report.reappearing_results)
                    .any(|r| r.sample_id == sample_id && r.requirement_key == key)
        };
        let mut changed = 0usize;
        for (before, after) in state.samples.iter().zip(&next.samples) {
            for (key, result) in &before.requirement_results {
                if after.result(key) != Some(result) {
                    changed += 1;
                    prop_assert!(named(&before.id, key), "{}/{} changed silently", before.id, key);
                }
            }
        }
        if report.is_empty() {
            prop_assert_eq!(changed, 0);
        }
    }
}
