use std::fmt;

#[derive(Debug)]
pub enum MatchError {
    InvalidPosition(u8),
    EmptyJerseyNumber,
    DuplicateJerseyNumber(String),
    SelectionOutOfOrder { event: &'static str, step: &'static str },
    RotationLocked,
    ValidationError(String),
    SerializationError(String),
    DeserializationError(String),
}

impl fmt::Display for MatchError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MatchError::InvalidPosition(number) => {
                write!(f, "Invalid court position: {} (expected 1-6)", number)
            }
            MatchError::EmptyJerseyNumber => {
                write!(f, "Jersey number must not be empty")
            }
            MatchError::DuplicateJerseyNumber(number) => {
                write!(f, "Jersey number {} is already on court", number)
            }
            MatchError::SelectionOutOfOrder { event, step } => {
                write!(f, "Selection event '{}' not accepted at step '{}'", event, step)
            }
            MatchError::RotationLocked => {
                write!(f, "Manual rotation is only allowed while no rally selection is in progress")
            }
            MatchError::ValidationError(msg) => {
                write!(f, "Validation error: {}", msg)
            }
            MatchError::SerializationError(msg) => {
                write!(f, "Serialization error: {}", msg)
            }
            MatchError::DeserializationError(msg) => {
                write!(f, "Deserialization error: {}", msg)
            }
        }
    }
}

impl std::error::Error for MatchError {}

impl From<serde_json::Error> for MatchError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_data() {
            MatchError::DeserializationError(err.to_string())
        } else {
            MatchError::SerializationError(err.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, MatchError>;
