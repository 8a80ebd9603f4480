//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate record construction and repository calls into use-case APIs.
//! - Keep callers decoupled from storage details.

pub mod author_service;
pub mod post_service;
