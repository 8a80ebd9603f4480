//! Post domain model.
//!
//! # Responsibility
//! - Define the canonical post record mapped onto the `posts` table.
//! - Validate every attribute at the point it is assigned.
//!
//! # Invariants
//! - `title` is non-empty and contains one of `CLICKBAIT_KEYWORDS`.
//! - `content`, when set, has at least `MIN_CONTENT_CHARS` characters.
//! - `summary`, when set, has at most `MAX_SUMMARY_CHARS` characters.
//! - `category`, when set, is one of `PostCategory`.
//! - A rejected assignment leaves the previous value in place.

use crate::model::validation::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Storage-generated surrogate key of a post row.
pub type PostId = i64;

/// Title must contain at least one of these, case-sensitive.
pub const CLICKBAIT_KEYWORDS: &[&str] = &["Won't Believe", "Secret", "Top", "Guess"];
pub const MIN_CONTENT_CHARS: usize = 250;
pub const MAX_SUMMARY_CHARS: usize = 250;

/// Closed set of post categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PostCategory {
    #[serde(rename = "Fiction")]
    Fiction,
    #[serde(rename = "Non-Fiction")]
    NonFiction,
}

impl PostCategory {
    /// Stable string stored in `posts.category`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fiction => "Fiction",
            Self::NonFiction => "Non-Fiction",
        }
    }

    /// Parses an exact category label.
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        match value {
            "Fiction" => Ok(Self::Fiction),
            "Non-Fiction" => Ok(Self::NonFiction),
            other => Err(ValidationError::InvalidCategory(other.to_string())),
        }
    }
}

impl Display for PostCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Post record for the `posts` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PostFields")]
pub struct Post {
    id: Option<PostId>,
    title: String,
    content: Option<String>,
    summary: Option<String>,
    category: Option<PostCategory>,
    /// Unix epoch milliseconds. `None` until persisted.
    created_at: Option<i64>,
    /// Unix epoch milliseconds. `None` until persisted.
    updated_at: Option<i64>,
}

#[derive(Deserialize)]
struct PostFields {
    #[serde(default)]
    id: Option<PostId>,
    title: String,
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    created_at: Option<i64>,
    #[serde(default)]
    updated_at: Option<i64>,
}

impl TryFrom<PostFields> for Post {
    type Error = ValidationError;

    fn try_from(fields: PostFields) -> Result<Self, Self::Error> {
        let mut post = Post::new(fields.title)?;
        post.set_content(fields.content)?;
        post.set_summary(fields.summary)?;
        post.set_category(fields.category.as_deref())?;
        post.id = fields.id;
        post.created_at = fields.created_at;
        post.updated_at = fields.updated_at;
        Ok(post)
    }
}

impl Post {
    /// Creates an unsaved post with only a title.
    pub fn new(title: impl Into<String>) -> Result<Self, ValidationError> {
        let title = title.into();
        validate_title(&title)?;
        Ok(Self {
            id: None,
            title,
            content: None,
            summary: None,
            category: None,
            created_at: None,
            updated_at: None,
        })
    }

    /// Rebuilds a persisted post from stored column values.
    pub(crate) fn from_storage(
        id: PostId,
        title: String,
        content: Option<String>,
        summary: Option<String>,
        category: Option<String>,
        created_at: i64,
        updated_at: i64,
    ) -> Result<Self, ValidationError> {
        Self::try_from(PostFields {
            id: Some(id),
            title,
            content,
            summary,
            category,
            created_at: Some(created_at),
            updated_at: Some(updated_at),
        })
    }

    pub fn id(&self) -> Option<PostId> {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    pub fn category(&self) -> Option<PostCategory> {
        self.category
    }

    pub fn created_at(&self) -> Option<i64> {
        self.created_at
    }

    pub fn updated_at(&self) -> Option<i64> {
        self.updated_at
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    pub fn set_title(&mut self, value: impl Into<String>) -> Result<(), ValidationError> {
        let value = value.into();
        validate_title(&value)?;
        self.title = value;
        Ok(())
    }

    pub fn set_content(&mut self, value: Option<String>) -> Result<(), ValidationError> {
        validate_content(value.as_deref())?;
        self.content = value;
        Ok(())
    }

    pub fn set_summary(&mut self, value: Option<String>) -> Result<(), ValidationError> {
        validate_summary(value.as_deref())?;
        self.summary = value;
        Ok(())
    }

    /// Assigns or clears the category from its exact label.
    pub fn set_category(&mut self, value: Option<&str>) -> Result<(), ValidationError> {
        self.category = validate_category(value)?;
        Ok(())
    }
}

/// Renders `Post(id=.., title=.., content=.., summary=..)` with every field
/// comma-separated, `title` and `content` included. Absent values print `None`.
/// `category` is not rendered.
impl Display for Post {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Post(id={}, title={}, content={}, summary={})",
            display_or_none(self.id),
            self.title,
            display_or_none(self.content.as_deref()),
            display_or_none(self.summary.as_deref()),
        )
    }
}

fn display_or_none<T: Display>(value: Option<T>) -> String {
    value.map_or_else(|| "None".to_string(), |inner| inner.to_string())
}

/// Requires a non-empty title containing a clickbait keyword.
pub fn validate_title(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::EmptyPostTitle);
    }
    if !CLICKBAIT_KEYWORDS
        .iter()
        .any(|keyword| value.contains(keyword))
    {
        return Err(ValidationError::TitleMissingClickbait);
    }
    Ok(())
}

pub fn validate_content(value: Option<&str>) -> Result<(), ValidationError> {
    if let Some(content) = value {
        let chars = content.chars().count();
        if chars < MIN_CONTENT_CHARS {
            return Err(ValidationError::ContentTooShort(chars));
        }
    }
    Ok(())
}

pub fn validate_summary(value: Option<&str>) -> Result<(), ValidationError> {
    if let Some(summary) = value {
        let chars = summary.chars().count();
        if chars > MAX_SUMMARY_CHARS {
            return Err(ValidationError::SummaryTooLong(chars));
        }
    }
    Ok(())
}

/// Accepts `None`, `"Fiction"` or `"Non-Fiction"` and returns the parsed category.
pub fn validate_category(value: Option<&str>) -> Result<Option<PostCategory>, ValidationError> {
    value.map(PostCategory::parse).transpose()
}

#[cfg(test)]
mod tests {
    use super::{
        validate_category, validate_content, validate_summary, validate_title, Post,
        PostCategory,
    };
    use crate::model::validation::ValidationError;

    #[test]
    fn title_requires_a_keyword() {
        assert!(validate_title("Top 10 Facts").is_ok());
        assert!(validate_title("You Won't Believe This").is_ok());
        assert!(validate_title("The Secret Garden").is_ok());
        assert!(validate_title("Guess Who").is_ok());
        assert_eq!(
            validate_title("Boring News"),
            Err(ValidationError::TitleMissingClickbait)
        );
        assert_eq!(validate_title(""), Err(ValidationError::EmptyPostTitle));
    }

    #[test]
    fn title_keyword_match_is_case_sensitive() {
        assert_eq!(
            validate_title("top 10 facts"),
            Err(ValidationError::TitleMissingClickbait)
        );
        assert!(validate_title("Stopwatch review").is_err());
    }

    #[test]
    fn content_and_summary_boundaries() {
        assert!(validate_content(None).is_ok());
        assert!(validate_content(Some("a".repeat(250).as_str())).is_ok());
        assert_eq!(
            validate_content(Some("a".repeat(249).as_str())),
            Err(ValidationError::ContentTooShort(249))
        );

        assert!(validate_summary(None).is_ok());
        assert!(validate_summary(Some("a".repeat(250).as_str())).is_ok());
        assert_eq!(
            validate_summary(Some("a".repeat(251).as_str())),
            Err(ValidationError::SummaryTooLong(251))
        );
    }

    #[test]
    fn lengths_count_characters_not_bytes() {
        // 250 two-byte characters.
        assert!(validate_content(Some("é".repeat(250).as_str())).is_ok());
        assert!(validate_summary(Some("é".repeat(250).as_str())).is_ok());
    }

    #[test]
    fn category_accepts_exact_labels_only() {
        assert_eq!(validate_category(None), Ok(None));
        assert_eq!(
            validate_category(Some("Fiction")),
            Ok(Some(PostCategory::Fiction))
        );
        assert_eq!(
            validate_category(Some("Non-Fiction")),
            Ok(Some(PostCategory::NonFiction))
        );
        for value in ["Drama", "fiction", "Nonfiction", ""] {
            assert!(validate_category(Some(value)).is_err(), "`{value}` accepted");
        }
    }

    #[test]
    fn display_lists_title_content_and_summary() {
        let mut post = Post::new("Secret Recipe").unwrap();
        post.set_summary(Some("short".to_string())).unwrap();
        assert_eq!(
            post.to_string(),
            "Post(id=None, title=Secret Recipe, content=None, summary=short)"
        );
    }
}
