//! Apply a confirmed rule-file update to the stored results.
//!
//! All or nothing: every precondition is checked before the first result is
//! touched, and the input state is never modified.

use std::collections::BTreeMap;

use auditor_core::errors::{AuditError, AuditResult};
use auditor_core::fingerprint::{requirement_fingerprint, rule_file_fingerprint};
use auditor_core::model::{
    AuditState, RequirementKey, RequirementResult, RuleFile, Sample, Tombstone,
};
use auditor_core::LifecycleEvent;
use auditor_observability::reconcile_span;

use crate::report::ChangeReport;

/// What happens to one stored result.
enum Disposition {
    Carry,
    Flag,
    Drop { title: String },
}

fn disposition(old: &RuleFile, new: &RuleFile, key: &str) -> Disposition {
    match (old.requirement(key), new.requirement(key)) {
        (Some(before), Some(after)) => {
            if requirement_fingerprint(before) == requirement_fingerprint(after) {
                Disposition::Carry
            } else {
                Disposition::Flag
            }
        }
        // A key the old file did not know comes back with unknown semantics.
        // Reported as a reappearing result.
        (None, Some(_)) => Disposition::Flag,
        (Some(before), None) => Disposition::Drop {
            title: before.title.clone(),
        },
        // Reported as an orphaned result.
        (None, None) => Disposition::Drop {
            title: String::new(),
        },
    }
}

fn verify_report(old: &RuleFile, new: &RuleFile, report: &ChangeReport) -> AuditResult<()> {
    let base = rule_file_fingerprint(old);
    if base != report.base_fingerprint {
        return Err(AuditError::ReportMismatch {
            expected: report.base_fingerprint.clone(),
            actual: base,
        });
    }
    let target = rule_file_fingerprint(new);
    if target != report.target_fingerprint {
        return Err(AuditError::ReportMismatch {
            expected: report.target_fingerprint.clone(),
            actual: target,
        });
    }
    Ok(())
}

fn flag(result: &RequirementResult) -> AuditResult<RequirementResult> {
    let lifecycle = result
        .lifecycle()
        .transition(LifecycleEvent::RuleFileChanged, result.status)?;
    let mut flagged = result.clone();
    flagged.set_lifecycle(lifecycle);
    Ok(flagged)
}

#[derive(Default)]
struct Tally {
    carried: usize,
    flagged: usize,
    dropped: usize,
}

fn reconcile_sample(
    sample: &Sample,
    old: &RuleFile,
    new: &RuleFile,
    tombstones: &mut Vec<Tombstone>,
    tally: &mut Tally,
) -> AuditResult<Sample> {
    let mut results: BTreeMap<RequirementKey, RequirementResult> = BTreeMap::new();
    for (key, result) in &sample.requirement_results {
        match disposition(old, new, key) {
            Disposition::Carry => {
                tally.carried += 1;
                results.insert(key.clone(), result.clone());
            }
            Disposition::Flag => {
                tally.flagged += 1;
                results.insert(key.clone(), flag(result)?);
            }
            Disposition::Drop { title } => {
                tally.dropped += 1;
                tombstones.push(Tombstone {
                    sample_id: sample.id.clone(),
                    requirement_key: key.clone(),
                    title,
                    rule_file_version: new.version().to_string(),
                });
            }
        }
    }
    Ok(Sample {
        requirement_results: results,
        ..sample.clone()
    })
}

/// Replace the rule file of `state` and bring every stored result in line.
///
/// `report` must come from `analyze_rule_file_changes` for this exact state
/// rule file and `new_rule_file`. Unchanged requirements are carried as is;
/// every existing result of a changed one is flagged for review with its
/// findings and timestamp kept; removed ones are dropped and tombstoned.
pub fn apply_rule_file_update(
    state: &AuditState,
    new_rule_file: &RuleFile,
    report: &ChangeReport,
) -> AuditResult<AuditState> {
    let old_rule_file = &state.rule_file_content;
    let _span = reconcile_span!(old_rule_file.version(), new_rule_file.version()).entered();

    new_rule_file.validate()?;
    verify_report(old_rule_file, new_rule_file, report)?;

    let mut tombstones = state.tombstones.clone();
    let mut tally = Tally::default();
    let samples = state
        .samples
        .iter()
        .map(|sample| {
            reconcile_sample(
                sample,
                old_rule_file,
                new_rule_file,
                &mut tombstones,
                &mut tally,
            )
        })
        .collect::<AuditResult<Vec<Sample>>>()?;

    tracing::info!(
        carried = tally.carried,
        flagged = tally.flagged,
        dropped = tally.dropped,
        "applied rule file update"
    );
    Ok(AuditState {
        rule_file_content: new_rule_file.clone(),
        samples,
        tombstones,
    })
}
