//! # auditor-status
//!
//! Status aggregation for the audit engine.
//!
//! - **Aggregator**: check status from its pass criteria (AND/OR, with the
//!   "does not comply" auto-pass), requirement status from its checks.
//! - **Summary**: per-sample and per-audit counts and roll-ups.
//! - **Update**: the single write path for results; keeps `status`,
//!   `lastStatusUpdate` and `needsReview` consistent.
//! - **Inspection**: definition shapes that aggregate vacuously.

pub mod aggregator;
pub mod inspection;
pub mod summary;
pub mod update;

pub use aggregator::{
    calculate_check_status, calculate_requirement_status, combine_pass_criteria, display_status,
    roll_up,
};
pub use inspection::{inspect_requirement, inspect_rule_file};
pub use summary::{summarize_audit, summarize_sample, AuditSummary, StatusCounts, StatusSummary};
pub use update::{acknowledge_review, apply_result_update, reaudit};
