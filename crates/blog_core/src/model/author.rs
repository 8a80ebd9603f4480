//! Author domain model.
//!
//! # Responsibility
//! - Define the canonical author record mapped onto the `authors` table.
//! - Validate every attribute at the point it is assigned.
//!
//! # Invariants
//! - `name` is never empty.
//! - `phone_number`, when set, is exactly 10 decimal digits.
//! - `id` is assigned by storage and never changes afterwards.
//! - A rejected assignment leaves the previous value in place.
//!
//! Name uniqueness is a storage constraint, checked when the record is
//! written (see `repo::author_repo`).

use crate::model::validation::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Storage-generated surrogate key of an author row.
pub type AuthorId = i64;

// `\d` is Unicode-aware: any decimal digit (category Nd) counts.
static PHONE_NUMBER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{10}$").expect("phone number pattern must compile"));

/// Author record for the `authors` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "AuthorFields")]
pub struct Author {
    id: Option<AuthorId>,
    name: String,
    phone_number: Option<String>,
    /// Unix epoch milliseconds. `None` until persisted.
    created_at: Option<i64>,
    /// Unix epoch milliseconds. `None` until persisted.
    updated_at: Option<i64>,
}

/// Unvalidated wire shape; converted through the same validators as setters.
#[derive(Deserialize)]
struct AuthorFields {
    #[serde(default)]
    id: Option<AuthorId>,
    name: String,
    #[serde(default)]
    phone_number: Option<String>,
    #[serde(default)]
    created_at: Option<i64>,
    #[serde(default)]
    updated_at: Option<i64>,
}

impl TryFrom<AuthorFields> for Author {
    type Error = ValidationError;

    fn try_from(fields: AuthorFields) -> Result<Self, Self::Error> {
        let mut author = Author::new(fields.name)?;
        author.set_phone_number(fields.phone_number)?;
        author.id = fields.id;
        author.created_at = fields.created_at;
        author.updated_at = fields.updated_at;
        Ok(author)
    }
}

impl Author {
    /// Creates an unsaved author.
    ///
    /// # Errors
    /// - `ValidationError::EmptyAuthorName` when `name` is empty.
    pub fn new(name: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into();
        validate_name(&name)?;
        Ok(Self {
            id: None,
            name,
            phone_number: None,
            created_at: None,
            updated_at: None,
        })
    }

    /// Rebuilds a persisted author from stored column values.
    ///
    /// Runs the same validators as the setters so corrupt rows are reported
    /// instead of masked.
    pub(crate) fn from_storage(
        id: AuthorId,
        name: String,
        phone_number: Option<String>,
        created_at: i64,
        updated_at: i64,
    ) -> Result<Self, ValidationError> {
        Self::try_from(AuthorFields {
            id: Some(id),
            name,
            phone_number,
            created_at: Some(created_at),
            updated_at: Some(updated_at),
        })
    }

    pub fn id(&self) -> Option<AuthorId> {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn phone_number(&self) -> Option<&str> {
        self.phone_number.as_deref()
    }

    pub fn created_at(&self) -> Option<i64> {
        self.created_at
    }

    pub fn updated_at(&self) -> Option<i64> {
        self.updated_at
    }

    /// Returns whether storage has assigned an id to this record.
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Assigns a new name after format validation.
    pub fn set_name(&mut self, value: impl Into<String>) -> Result<(), ValidationError> {
        let value = value.into();
        validate_name(&value)?;
        self.name = value;
        Ok(())
    }

    /// Assigns or clears the phone number after format validation.
    pub fn set_phone_number(&mut self, value: Option<String>) -> Result<(), ValidationError> {
        validate_phone_number(value.as_deref())?;
        self.phone_number = value;
        Ok(())
    }
}

impl Display for Author {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.id {
            Some(id) => write!(f, "Author(id={id}, name={})", self.name),
            None => write!(f, "Author(id=None, name={})", self.name),
        }
    }
}

/// Checks the format rule for author names.
///
/// Uniqueness across authors is not checked here; storage rejects duplicates
/// with `ValidationError::DuplicateAuthorName` at write time.
pub fn validate_name(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::EmptyAuthorName);
    }
    Ok(())
}

/// Accepts `None` or exactly ten decimal digits, ASCII or not.
pub fn validate_phone_number(value: Option<&str>) -> Result<(), ValidationError> {
    match value {
        Some(phone) if !PHONE_NUMBER_PATTERN.is_match(phone) => {
            Err(ValidationError::InvalidPhoneNumber)
        }
        _ => Ok(()),
    }
}
