//! AuditErrorCode trait for the host notification layer.

/// Every error enum exposes a stable code string so the host application can
/// pick a translated message without parsing the English text.
pub trait AuditErrorCode {
    /// Returns the error code string (e.g., "INVALID_RULE_FILE").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted notification string: `[ERROR_CODE] message`.
    fn notification_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const INVALID_RULE_FILE: &str = "INVALID_RULE_FILE";
pub const REPORT_MISMATCH: &str = "REPORT_MISMATCH";
pub const STALE_IMPACT: &str = "STALE_IMPACT";
pub const SAMPLE_NOT_FOUND: &str = "SAMPLE_NOT_FOUND";
pub const REQUIREMENT_NOT_FOUND: &str = "REQUIREMENT_NOT_FOUND";
pub const LIFECYCLE_ERROR: &str = "LIFECYCLE_ERROR";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const SERIALIZATION_ERROR: &str = "SERIALIZATION_ERROR";
