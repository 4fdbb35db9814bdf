//! Error types for the presentation pipeline
//!
//! Only malformed input is surfaced as an error. State-transition edge cases
//! (pagination out of range, stale filters) are absorbed by the table state
//! machine and never reach the caller.

use thiserror::Error;

/// Main error type for pipeline operations
#[derive(Error, Debug)]
pub enum PipelineError {
    /// The record collection is malformed (wrong shape, rating off scale, ...)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The snapshot could not be decoded as JSON at all
    #[error("Malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_input_message() {
        let err = PipelineError::InvalidInput("rating 7 at index 2".to_string());
        assert_eq!(err.to_string(), "Invalid input: rating 7 at index 2");
    }

    #[test]
    fn json_error_converts() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: PipelineError = json_err.into();
        assert!(matches!(err, PipelineError::Json(_)));
        assert!(err.to_string().starts_with("Malformed JSON"));
    }
}
