use crate::error::QuizseqError;
use serde::{Deserialize, Serialize};

/// Trait for configuration sections
pub trait ConfigSection: Serialize + for<'de> Deserialize<'de> + Default + Clone {
    fn section_name() -> &'static str;
    fn validate(&self) -> Result<(), QuizseqError>;
}

/// Builds a configuration error prefixed with the offending section.
pub(crate) fn section_error<S: ConfigSection>(message: &str) -> QuizseqError {
    QuizseqError::Configuration(format!("[{}] {}", S::section_name(), message))
}
