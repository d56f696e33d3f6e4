//! Error types for the generation pipeline.

use thiserror::Error;

/// Failures produced while turning a generation-endpoint response into a
/// typed domain value.
///
/// The retry loop treats `Transport`, `Extraction`, and `SchemaValidation`
/// uniformly: each one spends an attempt. `Exhausted` is terminal and carries
/// the last underlying failure's message.
#[derive(Debug, Clone, Error)]
pub enum GenError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("extraction error: {0}")]
    Extraction(String),

    #[error("schema validation failed: {0}")]
    SchemaValidation(String),

    #[error("generation failed after all attempts: {message}")]
    Exhausted { message: String },
}

impl GenError {
    /// Stable code for callers that match on failures across module
    /// boundaries (UI error states, logs).
    pub fn code(&self) -> &'static str {
        match self {
            GenError::Transport(_) => "TRANSPORT_FAILURE",
            GenError::Extraction(_) => "EXTRACTION_FAILURE",
            GenError::SchemaValidation(_) => "SCHEMA_VALIDATION_FAILURE",
            GenError::Exhausted { .. } => "GENERATION_EXHAUSTED",
        }
    }

    /// Whether another attempt could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, GenError::Exhausted { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_stable() {
        assert_eq!(GenError::Transport("x".into()).code(), "TRANSPORT_FAILURE");
        assert_eq!(GenError::Extraction("x".into()).code(), "EXTRACTION_FAILURE");
        assert_eq!(
            GenError::SchemaValidation("x".into()).code(),
            "SCHEMA_VALIDATION_FAILURE"
        );
        assert_eq!(
            GenError::Exhausted { message: "x".into() }.code(),
            "GENERATION_EXHAUSTED"
        );
    }

    #[test]
    fn exhausted_is_not_retryable() {
        assert!(GenError::Transport("down".into()).is_retryable());
        assert!(!GenError::Exhausted { message: "down".into() }.is_retryable());
    }

    #[test]
    fn exhausted_display_carries_last_failure() {
        let err = GenError::Exhausted {
            message: "transport error: connection refused".into(),
        };
        assert!(err.to_string().contains("connection refused"));
    }
}
