use std::collections::HashSet;

use auditor_core::model::{Requirement, RuleFile, Sample, SampleEdit};
use auditor_relevance::{analyze_sample_content_type_change, relevant_requirement_keys};
use proptest::prelude::*;

const CONTENT_TYPES: [&str; 4] = ["image", "text", "form", "video"];

fn content_type_set() -> impl Strategy<Value = Vec<String>> {
    proptest::sample::subsequence(CONTENT_TYPES.to_vec(), 0..=CONTENT_TYPES.len())
        .prop_map(|v| v.into_iter().map(str::to_string).collect())
}

fn rule_file_strategy() -> impl Strategy<Value = RuleFile> {
    proptest::collection::vec(content_type_set(), 0..12).prop_map(|scopes| RuleFile {
        metadata: Default::default(),
        requirements: scopes
            .into_iter()
            .enumerate()
            .map(|(i, content_type)| Requirement {
                key: format!("REQ-{i}"),
                content_type,
                ..Requirement::default()
            })
            .collect(),
    })
}

fn sample(selected: Vec<String>) -> Sample {
    Sample {
        id: "S".into(),
        selected_content_types: selected,
        ..Sample::default()
    }
}

proptest! {
    #[test]
    fn empty_selection_returns_every_requirement(rule_file in rule_file_strategy()) {
        let keys = relevant_requirement_keys(&rule_file, &sample(vec![]));
        let all: Vec<String> = rule_file.keys().map(str::to_string).collect();
        prop_assert_eq!(keys, all);
    }

    #[test]
    fn relevant_keys_are_a_subsequence_of_declaration_order(
        rule_file in rule_file_strategy(),
        selected in content_type_set(),
    ) {
        let keys = relevant_requirement_keys(&rule_file, &sample(selected));
        let mut declared = rule_file.keys();
        for key in &keys {
            prop_assert!(declared.any(|k| k == key.as_str()), "{} out of order", key);
        }
    }

    #[test]
    fn impact_sets_reconstruct_new_relevant(
        rule_file in rule_file_strategy(),
        before in content_type_set(),
        after in content_type_set(),
    ) {
        let sample_before = sample(before);
        let edit = SampleEdit::content_types(after);
        let impact = analyze_sample_content_type_change(&rule_file, &sample_before, &edit);

        let old: HashSet<String> = relevant_requirement_keys(&rule_file, &sample_before).into_iter().collect();
        let new: HashSet<String> = relevant_requirement_keys(&rule_file, &edit.apply_to(&sample_before)).into_iter().collect();
        let added: HashSet<String> = impact.added_reqs.iter().cloned().collect();
        let removed: HashSet<String> = impact.removed_reqs.iter().cloned().collect();

        prop_assert!(added.is_disjoint(&removed));
        let rebuilt: HashSet<String> = old.difference(&removed).cloned().chain(added.iter().cloned()).collect();
        prop_assert_eq!(rebuilt, new);
    }

    #[test]
    fn no_removals_means_no_data_loss(
        rule_file in rule_file_strategy(),
        before in content_type_set(),
        after in content_type_set(),
    ) {
        let impact = analyze_sample_content_type_change(
            &rule_file,
            &sample(before),
            &SampleEdit::content_types(after),
        );
        if impact.removed_reqs.is_empty() {
            prop_assert!(!impact.data_will_be_lost);
        }
    }
}
