//! Field validation error shared by Author and Post records.
//!
//! # Responsibility
//! - Name every rule a record attribute can violate.
//! - Render the human-readable message callers surface to users.
//!
//! # Invariants
//! - One variant per rule; messages are stable and user-facing.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Rejection raised when a record attribute assignment breaks a rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    EmptyAuthorName,
    /// Raised by persistence when another author already holds the name.
    DuplicateAuthorName(String),
    InvalidPhoneNumber,
    EmptyPostTitle,
    TitleMissingClickbait,
    /// Carries the rejected length in characters.
    ContentTooShort(usize),
    /// Carries the rejected length in characters.
    SummaryTooLong(usize),
    InvalidCategory(String),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyAuthorName => write!(f, "Author name cannot be empty."),
            Self::DuplicateAuthorName(_) => write!(f, "Author name must be unique."),
            Self::InvalidPhoneNumber => write!(f, "Phone number must be exactly 10 digits."),
            Self::EmptyPostTitle => write!(f, "Post title cannot be empty."),
            Self::TitleMissingClickbait => write!(
                f,
                "Post title must contain one of: \"Won't Believe\", \"Secret\", \"Top\", \"Guess\"."
            ),
            Self::ContentTooShort(_) => {
                write!(f, "Post content must be at least 250 characters long.")
            }
            Self::SummaryTooLong(_) => {
                write!(f, "Post summary must be a maximum of 250 characters.")
            }
            Self::InvalidCategory(_) => write!(
                f,
                "Post category must be either \"Fiction\" or \"Non-Fiction\"."
            ),
        }
    }
}

impl Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::ValidationError;

    #[test]
    fn messages_do_not_echo_rejected_values() {
        let err = ValidationError::DuplicateAuthorName("Ada".to_string());
        assert_eq!(err.to_string(), "Author name must be unique.");

        let err = ValidationError::InvalidCategory("Drama".to_string());
        assert!(!err.to_string().contains("Drama"));
    }
}
