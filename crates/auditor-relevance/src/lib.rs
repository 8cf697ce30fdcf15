//! # auditor-relevance
//!
//! Which requirements apply to a sample, and what changes when a sample's
//! content-type selection is edited.
//!
//! - **Resolver**: content-type intersection, failing open when a sample has
//!   no selection yet. Output keeps rule-file declaration order.
//! - **Impact**: diffs the relevant set before and after a proposed edit and
//!   reports whether recorded findings would be orphaned. A decision gate for
//!   the caller's confirm/discard step, never a mutation.

pub mod impact;
pub mod resolver;

pub use impact::{
    analyze_sample_content_type_change, commit_sample_edit, SampleEditDecision, SampleEditImpact,
};
pub use resolver::{get_relevant_requirements, is_requirement_relevant, relevant_requirement_keys};
