//! Author use-case service.
//!
//! # Responsibility
//! - Build and mutate authors through validating setters.
//! - Delegate persistence to repository implementations.
//!
//! # Invariants
//! - A rejected field leaves the stored author untouched.
//! - Service layer remains storage-agnostic.

use crate::model::author::{Author, AuthorId};
use crate::repo::author_repo::{AuthorListQuery, AuthorRepository};
use crate::repo::{RepoError, RepoResult};

/// Use-case service wrapper for author operations.
pub struct AuthorService<R: AuthorRepository> {
    repo: R,
}

impl<R: AuthorRepository> AuthorService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Validates and stores a new author.
    ///
    /// # Errors
    /// - `RepoError::Validation` for an empty name, a malformed phone number,
    ///   or a name already held by another author.
    pub fn register_author(
        &self,
        name: impl Into<String>,
        phone_number: Option<String>,
    ) -> RepoResult<Author> {
        let mut author = Author::new(name)?;
        author.set_phone_number(phone_number)?;
        self.repo.create_author(&author)
    }

    /// Renames an existing author.
    pub fn rename_author(&self, id: AuthorId, name: impl Into<String>) -> RepoResult<Author> {
        let mut author = self.load(id)?;
        author.set_name(name)?;
        self.repo.update_author(&author)
    }

    /// Sets or clears the phone number of an existing author.
    pub fn change_phone_number(
        &self,
        id: AuthorId,
        phone_number: Option<String>,
    ) -> RepoResult<Author> {
        let mut author = self.load(id)?;
        author.set_phone_number(phone_number)?;
        self.repo.update_author(&author)
    }

    pub fn get_author(&self, id: AuthorId) -> RepoResult<Option<Author>> {
        self.repo.get_author(id)
    }

    pub fn find_author_by_name(&self, name: &str) -> RepoResult<Option<Author>> {
        self.repo.find_author_by_name(name)
    }

    pub fn list_authors(&self, query: &AuthorListQuery) -> RepoResult<Vec<Author>> {
        self.repo.list_authors(query)
    }

    pub fn delete_author(&self, id: AuthorId) -> RepoResult<()> {
        self.repo.delete_author(id)
    }

    fn load(&self, id: AuthorId) -> RepoResult<Author> {
        self.repo.get_author(id)?.ok_or(RepoError::NotFound {
            entity: "author",
            id,
        })
    }
}
