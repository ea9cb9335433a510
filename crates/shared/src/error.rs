use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("fare level must be between 1 and 3, got {0}")]
    InvalidFareLevel(u8),
    #[error("unknown surcharge option '{0}'")]
    UnknownOption(String),
}
