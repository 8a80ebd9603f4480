//! Post use-case service.
//!
//! # Responsibility
//! - Build posts from request models through validating setters.
//! - Apply partial revisions atomically: all fields validate or none are written.
//!
//! # Invariants
//! - Service APIs never bypass repository persistence contracts.

use crate::model::post::{Post, PostId};
use crate::repo::post_repo::{PostListQuery, PostRepository};
use crate::repo::{RepoError, RepoResult};

/// Request model for publishing a post.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewPost {
    pub title: String,
    pub content: Option<String>,
    pub summary: Option<String>,
    /// Exact category label, `Fiction` or `Non-Fiction`.
    pub category: Option<String>,
}

/// Partial update for a stored post.
///
/// Outer `None` leaves a field as is; `Some(None)` clears an optional field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostRevision {
    pub title: Option<String>,
    pub content: Option<Option<String>>,
    pub summary: Option<Option<String>>,
    pub category: Option<Option<String>>,
}

/// Use-case service wrapper for post operations.
pub struct PostService<R: PostRepository> {
    repo: R,
}

impl<R: PostRepository> PostService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Validates every field of `request` and stores the post.
    pub fn publish_post(&self, request: &NewPost) -> RepoResult<Post> {
        let mut post = Post::new(request.title.clone())?;
        post.set_content(request.content.clone())?;
        post.set_summary(request.summary.clone())?;
        post.set_category(request.category.as_deref())?;
        self.repo.create_post(&post)
    }

    /// Applies `revision` to the stored post.
    ///
    /// # Errors
    /// - `RepoError::NotFound` when no post has `id`.
    /// - `RepoError::Validation` for the first rejected field; nothing is written.
    pub fn revise_post(&self, id: PostId, revision: &PostRevision) -> RepoResult<Post> {
        let mut post = self.repo.get_post(id)?.ok_or(RepoError::NotFound {
            entity: "post",
            id,
        })?;

        if let Some(title) = &revision.title {
            post.set_title(title.clone())?;
        }
        if let Some(content) = &revision.content {
            post.set_content(content.clone())?;
        }
        if let Some(summary) = &revision.summary {
            post.set_summary(summary.clone())?;
        }
        if let Some(category) = &revision.category {
            post.set_category(category.as_deref())?;
        }

        self.repo.update_post(&post)
    }

    pub fn get_post(&self, id: PostId) -> RepoResult<Option<Post>> {
        self.repo.get_post(id)
    }

    pub fn list_posts(&self, query: &PostListQuery) -> RepoResult<Vec<Post>> {
        self.repo.list_posts(query)
    }

    pub fn delete_post(&self, id: PostId) -> RepoResult<()> {
        self.repo.delete_post(id)
    }
}
