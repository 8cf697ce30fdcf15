//! Span definitions per engine operation: relevance, status, problems,
//! impact analysis, reconciliation.

/// Create a relevance-resolution span.
#[macro_export]
macro_rules! relevance_span {
    ($sample_id:expr) => {
        tracing::debug_span!("auditor.relevance", sample_id = %$sample_id)
    };
}

/// Create a status-aggregation span.
#[macro_export]
macro_rules! status_span {
    ($requirement_key:expr) => {
        tracing::trace_span!("auditor.status", requirement_key = %$requirement_key)
    };
}

/// Create a problem-collection span.
#[macro_export]
macro_rules! problems_span {
    ($sample_count:expr) => {
        tracing::debug_span!("auditor.problems", sample_count = $sample_count)
    };
}

/// Create a sample-edit impact span.
#[macro_export]
macro_rules! impact_span {
    ($sample_id:expr) => {
        tracing::info_span!("auditor.impact", sample_id = %$sample_id)
    };
}

/// Create a rule-file reconciliation span.
#[macro_export]
macro_rules! reconcile_span {
    ($from_version:expr, $to_version:expr) => {
        tracing::info_span!(
            "auditor.reconcile",
            from_version = %$from_version,
            to_version = %$to_version
        )
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const RELEVANCE: &str = "auditor.relevance";
    pub const STATUS: &str = "auditor.status";
    pub const PROBLEMS: &str = "auditor.problems";
    pub const IMPACT: &str = "auditor.impact";
    pub const RECONCILE: &str = "auditor.reconcile";
}
