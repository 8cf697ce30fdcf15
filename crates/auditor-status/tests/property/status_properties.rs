use auditor_core::model::{
    Check, CheckLogic, CheckOverallStatus, CheckResult, PassCriterion, PassCriterionResult,
    PassCriterionStatus, RequirementStatus,
};
use auditor_status::{calculate_check_status, combine_pass_criteria, roll_up};
use proptest::prelude::*;

fn criterion_status() -> impl Strategy<Value = PassCriterionStatus> {
    prop_oneof![
        Just(PassCriterionStatus::NotAudited),
        Just(PassCriterionStatus::Passed),
        Just(PassCriterionStatus::Failed),
    ]
}

fn requirement_status() -> impl Strategy<Value = RequirementStatus> {
    prop_oneof![
        Just(RequirementStatus::NotAudited),
        Just(RequirementStatus::PartiallyAudited),
        Just(RequirementStatus::Passed),
        Just(RequirementStatus::Failed),
    ]
}

fn check_and_result(
    logic: CheckLogic,
    overall: CheckOverallStatus,
    statuses: &[PassCriterionStatus],
) -> (Check, CheckResult) {
    let check = Check {
        id: "1".into(),
        logic,
        pass_criteria: (0..statuses.len())
            .map(|i| PassCriterion {
                id: i.to_string(),
                ..PassCriterion::default()
            })
            .collect(),
        ..Check::default()
    };
    let result = CheckResult {
        overall_status: overall,
        pass_criteria: statuses
            .iter()
            .enumerate()
            .map(|(i, status)| {
                (
                    i.to_string(),
                    PassCriterionResult {
                        status: *status,
                        ..PassCriterionResult::default()
                    },
                )
            })
            .collect(),
    };
    (check, result)
}

proptest! {
    #[test]
    fn does_not_comply_always_passes(statuses in proptest::collection::vec(criterion_status(), 0..6)) {
        for logic in [CheckLogic::And, CheckLogic::Or] {
            let (check, result) = check_and_result(logic, CheckOverallStatus::NotApplicable, &statuses);
            prop_assert_eq!(calculate_check_status(&check, Some(&result)), RequirementStatus::Passed);
        }
    }

    #[test]
    fn not_audited_check_ignores_criteria(statuses in proptest::collection::vec(criterion_status(), 0..6)) {
        let (check, result) = check_and_result(CheckLogic::And, CheckOverallStatus::NotAudited, &statuses);
        prop_assert_eq!(calculate_check_status(&check, Some(&result)), RequirementStatus::NotAudited);
    }

    #[test]
    fn and_matches_its_definition(statuses in proptest::collection::vec(criterion_status(), 1..6)) {
        let status = combine_pass_criteria(CheckLogic::And, statuses.iter().copied());
        let all_passed = statuses.iter().all(|s| *s == PassCriterionStatus::Passed);
        let any_failed = statuses.iter().any(|s| *s == PassCriterionStatus::Failed);
        prop_assert_eq!(status == RequirementStatus::Passed, all_passed);
        prop_assert_eq!(status == RequirementStatus::Failed, any_failed);
    }

    #[test]
    fn or_matches_its_definition(statuses in proptest::collection::vec(criterion_status(), 1..6)) {
        let status = combine_pass_criteria(CheckLogic::Or, statuses.iter().copied());
        let any_passed = statuses.iter().any(|s| *s == PassCriterionStatus::Passed);
        let all_failed = statuses.iter().all(|s| *s == PassCriterionStatus::Failed);
        prop_assert_eq!(status == RequirementStatus::Passed, any_passed);
        prop_assert_eq!(status == RequirementStatus::Failed, all_failed);
    }

    #[test]
    fn check_status_is_deterministic(statuses in proptest::collection::vec(criterion_status(), 0..6)) {
        let (check, result) = check_and_result(CheckLogic::Or, CheckOverallStatus::Passed, &statuses);
        let first = calculate_check_status(&check, Some(&result));
        let second = calculate_check_status(&check, Some(&result.clone()));
        prop_assert_eq!(first, second);
    }

    #[test]
    fn roll_up_is_order_independent(mut statuses in proptest::collection::vec(requirement_status(), 0..8)) {
        let forward = roll_up(statuses.iter().copied());
        statuses.reverse();
        prop_assert_eq!(forward, roll_up(statuses.iter().copied()));
    }

    #[test]
    fn any_failure_fails_the_roll_up(statuses in proptest::collection::vec(requirement_status(), 1..8)) {
        let status = roll_up(statuses.iter().copied());
        if statuses.contains(&RequirementStatus::Failed) {
            prop_assert_eq!(status, RequirementStatus::Failed);
        } else {
            prop_assert_ne!(status, RequirementStatus::Failed);
        }
    }
}
