//! Validation error types and shared field checks

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

/// Loose address check: one `@`, no whitespace, a dotted domain.
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("invalid email regex")
});

/// Validation error for domain inputs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Field is empty when it shouldn't be
    Empty { field: &'static str },

    /// Field exceeds maximum length
    TooLong { field: &'static str, max: usize },

    /// String doesn't match required format (e.g., email)
    InvalidFormat { field: &'static str, reason: &'static str },

    /// Numeric parameter outside its allowed range
    OutOfRange {
        field: &'static str,
        min: u32,
        max: Option<u32>,
    },

    /// Partial update carried no fields
    NothingToUpdate,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{} cannot be empty", field),
            Self::TooLong { field, max } => {
                write!(f, "{} exceeds maximum length of {} characters", field, max)
            }
            Self::InvalidFormat { field, reason } => {
                write!(f, "{}: {}", field, reason)
            }
            Self::OutOfRange {
                field,
                min,
                max: Some(max),
            } => write!(f, "{} must be between {} and {}", field, min, max),
            Self::OutOfRange {
                field,
                min,
                max: None,
            } => write!(f, "{} must be at least {}", field, min),
            Self::NothingToUpdate => write!(f, "at least one field must be provided"),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Trim `value` and require 1..=`max` characters.
pub(crate) fn bounded_text(
    field: &'static str,
    value: &str,
    max: usize,
) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty { field });
    }
    if trimmed.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }
    Ok(trimmed.to_owned())
}

/// Require a non-blank value, kept as given.
pub(crate) fn required_text(field: &'static str, value: &str) -> Result<String, ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Empty { field });
    }
    Ok(value.to_owned())
}

pub(crate) fn email(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty { field });
    }
    if !EMAIL_RE.is_match(trimmed) {
        return Err(ValidationError::InvalidFormat {
            field,
            reason: "must be a valid email",
        });
    }
    Ok(trimmed.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ValidationError::TooLong {
            field: "subject",
            max: 200,
        };
        assert_eq!(
            err.to_string(),
            "subject exceeds maximum length of 200 characters"
        );

        let err = ValidationError::OutOfRange {
            field: "limit",
            min: 1,
            max: Some(100),
        };
        assert_eq!(err.to_string(), "limit must be between 1 and 100");
    }

    #[test]
    fn bounded_text_trims_and_counts_chars() {
        assert_eq!(bounded_text("name", "  Ada  ", 100).unwrap(), "Ada");
        assert!(matches!(
            bounded_text("name", "   ", 100),
            Err(ValidationError::Empty { field: "name" })
        ));
        // multi-byte characters count once
        assert!(bounded_text("name", &"é".repeat(100), 100).is_ok());
        assert!(bounded_text("name", &"é".repeat(101), 100).is_err());
    }

    #[test]
    fn email_format() {
        assert!(email("email", "a@b.com").is_ok());
        assert!(email("email", "first.last@sub.example.org").is_ok());
        assert!(email("email", "no-at-sign.com").is_err());
        assert!(email("email", "a@b").is_err());
        assert!(email("email", "a b@c.com").is_err());
    }
}
