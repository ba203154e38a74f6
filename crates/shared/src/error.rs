use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    #[error("unknown bin category '{0}'")]
    UnknownCategory(String),
    #[error("keyword must not be empty")]
    EmptyKeyword,
    #[error("instruction for keyword '{0}' must not be empty")]
    EmptyInstruction(String),
    #[error("confidence {0} is outside 0.0..=1.0")]
    ConfidenceOutOfRange(f32),
}
