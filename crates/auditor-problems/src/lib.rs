//! # auditor-problems
//!
//! The audit's "needs help" list: every relevant pass criterion on which the
//! auditor recorded a stuck description, grouped by requirement and sample.
//! Collection is read-only; solving a problem re-dispatches the result
//! through `auditor-status`.

pub mod collector;
pub mod grouping;
pub mod resolution;

pub use collector::{collect_audit_problems, scan_problems, ProblemItem, ProblemScan};
pub use grouping::{group_problems, ProblemGroup, ProblemGroupKey};
pub use resolution::{mark_problem_solved, resolve_problem};
