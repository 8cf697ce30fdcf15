use auditor_core::lifecycle::{LifecycleEvent, ResultLifecycle};
use auditor_core::model::*;

fn requirement(key: &str) -> Requirement {
    Requirement {
        key: key.into(),
        ..Requirement::default()
    }
}

#[test]
fn rule_file_validate_rejects_blank_key() {
    let rule_file = RuleFile {
        metadata: RuleFileMetadata::default(),
        requirements: vec![requirement("A"), requirement("  ")],
    };
    assert!(matches!(
        rule_file.validate(),
        Err(auditor_core::RuleFileError::EmptyKey { index: 1 })
    ));
}

#[test]
fn display_id_prefers_id() {
    let mut req = requirement("REQ-1");
    assert_eq!(req.display_id(), "REQ-1");
    req.id = "1.1.1a".into();
    assert_eq!(req.display_id(), "1.1.1a");
}

#[test]
fn default_result_holds_no_recorded_data() {
    let mut result = RequirementResult::default();
    assert!(!result.has_recorded_data());
    result.check_results.insert("1".into(), CheckResult::default());
    assert!(!result.has_recorded_data(), "empty check result is not data");
    result.check_results.get_mut("1").unwrap().overall_status = CheckOverallStatus::NotApplicable;
    assert!(result.has_recorded_data());
}

#[test]
fn whitespace_stuck_text_is_not_stuck() {
    let pc = PassCriterionResult {
        stuck_problem_description: "   ".into(),
        ..PassCriterionResult::default()
    };
    assert!(!pc.is_stuck());
}

#[test]
fn sample_edit_merges_only_given_fields() {
    let sample = Sample {
        id: "S1".into(),
        description: "Home".into(),
        selected_content_types: vec!["image".into()],
        ..Sample::default()
    };
    let edited = SampleEdit::content_types(["text"]).apply_to(&sample);
    assert_eq!(edited.description, "Home");
    assert_eq!(edited.selected_content_types, vec!["text".to_string()]);
    assert_eq!(sample.selected_content_types, vec!["image".to_string()]);
}

#[test]
fn lifecycle_round_trips_through_result() {
    let mut result = RequirementResult {
        status: RequirementStatus::Passed,
        ..RequirementResult::default()
    };
    assert_eq!(result.lifecycle(), ResultLifecycle::Complete);
    let stale = result
        .lifecycle()
        .transition(LifecycleEvent::RuleFileChanged, result.status)
        .unwrap();
    result.set_lifecycle(stale);
    assert!(result.needs_review);
    assert_eq!(result.lifecycle(), ResultLifecycle::StaleNeedsReview);
}

#[test]
fn result_serializes_camel_case() {
    let json = serde_json::to_value(RequirementResult::default()).unwrap();
    assert!(json.get("needsReview").is_some());
    assert!(json.get("checkResults").is_some());
    assert_eq!(json["status"], "not_audited");
}

#[test]
fn check_logic_serializes_upper_case() {
    assert_eq!(serde_json::to_value(CheckLogic::Or).unwrap(), "OR");
    assert_eq!(CheckLogic::parse(" and "), Some(CheckLogic::And));
    assert_eq!(CheckLogic::parse("xor"), None);
}

#[test]
fn orphaned_keys_are_reported() {
    let mut sample = Sample {
        id: "S1".into(),
        ..Sample::default()
    };
    sample
        .requirement_results
        .insert("GONE".into(), RequirementResult::default());
    let state = AuditState::new(
        RuleFile {
            metadata: RuleFileMetadata::default(),
            requirements: vec![requirement("A")],
        },
        vec![sample],
    );
    assert_eq!(state.orphaned_result_keys(), vec![("S1", "GONE")]);
}
