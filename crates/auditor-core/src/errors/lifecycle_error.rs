/// Invalid requirement-result lifecycle transitions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LifecycleError {
    #[error("invalid lifecycle transition: {event} from {from}")]
    InvalidTransition {
        from: &'static str,
        event: &'static str,
    },
}

impl super::AuditErrorCode for LifecycleError {
    fn error_code(&self) -> &'static str {
        super::error_code::LIFECYCLE_ERROR
    }
}
