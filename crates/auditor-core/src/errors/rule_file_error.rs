//! Rule file shape errors.

use super::error_code::{self, AuditErrorCode};

/// A rule file that cannot be used as the ground truth of an audit.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuleFileError {
    #[error("rule file is not a JSON object")]
    NotAnObject,

    #[error("rule file has no requirements collection (found {found})")]
    MissingRequirements { found: String },

    #[error("requirement at position {index} has an empty key")]
    EmptyKey { index: usize },

    #[error("duplicate requirement key: {key}")]
    DuplicateKey { key: String },
}

impl AuditErrorCode for RuleFileError {
    fn error_code(&self) -> &'static str {
        error_code::INVALID_RULE_FILE
    }
}
