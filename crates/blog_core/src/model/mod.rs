//! Record models for authors and posts.
//!
//! # Responsibility
//! - Define the in-memory shape of each persisted record.
//! - Enforce field-level rules at attribute assignment.
//!
//! # Invariants
//! - A record value in memory always satisfies its format rules.
//! - Cross-record rules (author name uniqueness) belong to `repo`.

pub mod author;
pub mod post;
pub mod validation;
