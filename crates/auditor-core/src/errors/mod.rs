mod audit_error;
mod config_error;
pub mod error_code;
mod lifecycle_error;
mod rule_file_error;

pub use audit_error::{AuditError, AuditResult};
pub use config_error::ConfigError;
pub use error_code::AuditErrorCode;
pub use lifecycle_error::LifecycleError;
pub use rule_file_error::RuleFileError;
