//! # auditor-reconcile
//!
//! Rule-file updates in two phases. `analyze_rule_file_changes` diffs the
//! active rule file against a candidate by requirement key and content
//! fingerprint and produces a [`ChangeReport`] for the auditor to confirm.
//! `apply_rule_file_update` then swaps the rule file in and realigns every
//! sample's results with it: carried, flagged for review, or dropped with a
//! tombstone.

pub mod apply;
pub mod diff;
pub mod report;

pub use apply::apply_rule_file_update;
pub use diff::{analyze_rule_file_changes, change_aspects};
pub use report::{
    AddedRequirement, ChangeAspect, ChangeReport, RemovedRequirement, ResultRef,
    UpdatedRequirement,
};
