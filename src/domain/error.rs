//! Domain validation errors for core domain types.
//!
//! These errors are returned when a request would violate a domain rule:
//! an empty title, a progress value outside `0..=100`, an unknown
//! difficulty and so on. They surface to HTTP clients as `400`.
//!
//! ```
//! use learnhub::domain::error::DomainError;
//! use learnhub::domain::enrollment::Progress;
//!
//! assert!(matches!(
//!     Progress::try_new(140.0),
//!     Err(DomainError::ProgressOutOfRange { .. })
//! ));
//! ```

use thiserror::Error;

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// A required text field was empty or whitespace.
    #[error("{field} is required")]
    Required {
        /// Name of the missing field.
        field: &'static str,
    },

    /// A text field exceeded its maximum length.
    #[error("{field} must be at most {max} characters")]
    TooLong {
        /// Name of the field.
        field: &'static str,
        /// Maximum number of characters.
        max: usize,
    },

    /// A text field was shorter than its minimum length.
    #[error("{field} must be at least {min} characters")]
    TooShort {
        /// Name of the field.
        field: &'static str,
        /// Minimum number of characters.
        min: usize,
    },

    /// Progress must be a percentage.
    #[error("progress must be between 0 and 100, got {value}")]
    ProgressOutOfRange {
        /// The rejected value.
        value: f64,
    },

    /// A value did not match any of the accepted variants.
    #[error("invalid {field} '{value}', expected one of: {expected}")]
    InvalidChoice {
        /// Name of the field.
        field: &'static str,
        /// The rejected value.
        value: String,
        /// Comma separated list of accepted values.
        expected: &'static str,
    },

    /// A numeric value fell outside its allowed range.
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        /// Name of the field.
        field: &'static str,
        /// The rejected value.
        value: i64,
        /// Inclusive lower bound.
        min: i64,
        /// Inclusive upper bound.
        max: i64,
    },

    /// An email address was malformed.
    #[error("invalid email address '{0}'")]
    InvalidEmail(String),

    /// A quiz attempt did not answer every question.
    #[error("expected {expected} answers, got {actual}")]
    AnswerCountMismatch {
        /// Number of questions in the quiz.
        expected: usize,
        /// Number of answers submitted.
        actual: usize,
    },
}

/// Trim `value` and reject it when empty.
pub fn required(field: &'static str, value: &str) -> Result<String, DomainError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::Required { field });
    }
    Ok(trimmed.to_string())
}

/// Like [`required`], additionally bounding the length in characters.
pub fn bounded(
    field: &'static str,
    value: &str,
    min: usize,
    max: usize,
) -> Result<String, DomainError> {
    let trimmed = required(field, value)?;
    let len = trimmed.chars().count();
    if len < min {
        return Err(DomainError::TooShort { field, min });
    }
    if len > max {
        return Err(DomainError::TooLong { field, max });
    }
    Ok(trimmed)
}
