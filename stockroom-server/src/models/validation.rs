//! Validation error types

use std::fmt;

/// Validation error for domain models
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Field is empty when it shouldn't be
    Empty { field: &'static str },

    /// Field exceeds maximum length
    TooLong { field: &'static str, max: usize },

    /// Numeric field below zero
    Negative { field: &'static str },

    /// Numeric field outside what the column can hold
    OutOfRange { field: &'static str, reason: &'static str },

    /// Field sent as explicit null but has no null state
    NotNullable { field: &'static str },

    /// String doesn't match required format (e.g., email)
    InvalidFormat { field: &'static str, reason: &'static str },

    /// Body, query string, or path could not be decoded
    Malformed { part: &'static str, reason: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{} cannot be empty", field),
            Self::TooLong { field, max } => {
                write!(f, "{} exceeds maximum length of {} characters", field, max)
            }
            Self::Negative { field } => write!(f, "{} must be >= 0", field),
            Self::OutOfRange { field, reason } => write!(f, "{}: {}", field, reason),
            Self::NotNullable { field } => write!(f, "{} cannot be null", field),
            Self::InvalidFormat { field, reason } => {
                write!(f, "{}: {}", field, reason)
            }
            Self::Malformed { part, reason } => write!(f, "invalid {}: {}", part, reason),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Reject text longer than the column holds (counted in characters).
pub(crate) fn max_chars(
    field: &'static str,
    value: &str,
    max: usize,
) -> Result<(), ValidationError> {
    if value.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }
    Ok(())
}

/// Reject empty and over-long text. Whitespace counts as content.
pub(crate) fn bounded_text(
    field: &'static str,
    value: &str,
    max: usize,
) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::Empty { field });
    }
    max_chars(field, value, max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ValidationError::TooLong {
            field: "name",
            max: 100,
        };
        assert_eq!(
            err.to_string(),
            "name exceeds maximum length of 100 characters"
        );
        assert_eq!(
            ValidationError::Negative { field: "quantity" }.to_string(),
            "quantity must be >= 0"
        );
    }

    #[test]
    fn bounded_text_rules() {
        assert!(bounded_text("name", "ok", 3).is_ok());
        assert!(bounded_text("name", "   ", 3).is_ok());
        assert_eq!(
            bounded_text("name", "", 3),
            Err(ValidationError::Empty { field: "name" })
        );
        assert_eq!(
            bounded_text("name", "four", 3),
            Err(ValidationError::TooLong { field: "name", max: 3 })
        );
        // counted in characters, not bytes
        assert!(bounded_text("name", "äöü", 3).is_ok());
    }

    #[test]
    fn max_chars_allows_empty() {
        assert!(max_chars("email", "", 3).is_ok());
        assert_eq!(
            max_chars("email", "abcd", 3),
            Err(ValidationError::TooLong { field: "email", max: 3 })
        );
    }
}
