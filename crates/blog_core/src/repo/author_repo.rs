//! Author repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD APIs over the `authors` table.
//! - Turn `authors.name` unique-constraint violations into
//!   `ValidationError::DuplicateAuthorName`.
//!
//! # Invariants
//! - Name uniqueness is decided by SQLite inside the write statement, never
//!   by a separate read before it.
//! - `created_at` is written once; every update refreshes `updated_at`.

use crate::db::migrations::AUTHORS_TABLE;
use crate::model::author::{Author, AuthorId};
use crate::model::validation::ValidationError;
use crate::repo::{
    count_from_db, ensure_connection_ready, push_pagination, RepoError, RepoResult,
};
use log::{info, warn};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};

const AUTHOR_ENTITY: &str = "author";
const AUTHOR_SELECT_SQL: &str = "SELECT
    id,
    name,
    phone_number,
    created_at,
    updated_at
FROM authors";

/// Pagination options for listing authors.
#[derive(Debug, Clone, Default)]
pub struct AuthorListQuery {
    pub limit: Option<u32>,
    pub offset: u32,
}

/// Repository interface for author CRUD operations.
pub trait AuthorRepository {
    /// Inserts a new author and returns it with storage-assigned fields.
    fn create_author(&self, author: &Author) -> RepoResult<Author>;
    /// Writes name and phone number of a persisted author.
    ///
    /// On `ValidationError::DuplicateAuthorName` the stored row is unchanged,
    /// but the caller's `author` still holds the rejected name. Reload it with
    /// `get_author` before reusing it.
    fn update_author(&self, author: &Author) -> RepoResult<Author>;
    fn get_author(&self, id: AuthorId) -> RepoResult<Option<Author>>;
    /// Exact, case-sensitive name lookup.
    fn find_author_by_name(&self, name: &str) -> RepoResult<Option<Author>>;
    /// Lists authors ordered by id.
    fn list_authors(&self, query: &AuthorListQuery) -> RepoResult<Vec<Author>>;
    fn count_authors(&self) -> RepoResult<u64>;
    /// Removes the row. No cascade is performed.
    fn delete_author(&self, id: AuthorId) -> RepoResult<()>;
}

/// SQLite-backed author repository.
pub struct SqliteAuthorRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteAuthorRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &AUTHORS_TABLE)?;
        Ok(Self { conn })
    }

    fn fetch_one(&self, filter_sql: &str, value: Value) -> RepoResult<Option<Author>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{AUTHOR_SELECT_SQL} WHERE {filter_sql};"))?;
        let mut rows = stmt.query([value])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_author_row(row)?));
        }

        Ok(None)
    }

    fn reload(&self, id: AuthorId) -> RepoResult<Author> {
        self.get_author(id)?.ok_or(RepoError::NotFound {
            entity: AUTHOR_ENTITY,
            id,
        })
    }
}

impl AuthorRepository for SqliteAuthorRepository<'_> {
    fn create_author(&self, author: &Author) -> RepoResult<Author> {
        if let Some(id) = author.id() {
            return Err(RepoError::AlreadyPersisted {
                entity: AUTHOR_ENTITY,
                id,
            });
        }

        self.conn
            .execute(
                "INSERT INTO authors (name, phone_number) VALUES (?1, ?2);",
                params![author.name(), author.phone_number()],
            )
            .map_err(|err| map_write_error(err, author.name()))?;

        let id = self.conn.last_insert_rowid();
        info!("event=author_create module=repo status=ok author_id={id}");
        self.reload(id)
    }

    fn update_author(&self, author: &Author) -> RepoResult<Author> {
        let id = author.id().ok_or(RepoError::NotPersisted(AUTHOR_ENTITY))?;

        let changed = self
            .conn
            .execute(
                "UPDATE authors
                 SET
                    name = ?1,
                    phone_number = ?2,
                    updated_at = (strftime('%s', 'now') * 1000)
                 WHERE id = ?3;",
                params![author.name(), author.phone_number(), id],
            )
            .map_err(|err| map_write_error(err, author.name()))?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: AUTHOR_ENTITY,
                id,
            });
        }

        info!("event=author_update module=repo status=ok author_id={id}");
        self.reload(id)
    }

    fn get_author(&self, id: AuthorId) -> RepoResult<Option<Author>> {
        self.fetch_one("id = ?1", Value::Integer(id))
    }

    fn find_author_by_name(&self, name: &str) -> RepoResult<Option<Author>> {
        self.fetch_one("name = ?1", Value::Text(name.to_string()))
    }

    fn list_authors(&self, query: &AuthorListQuery) -> RepoResult<Vec<Author>> {
        let mut sql = format!("{AUTHOR_SELECT_SQL} ORDER BY id ASC");
        let mut bind_values: Vec<Value> = Vec::new();
        push_pagination(&mut sql, &mut bind_values, query.limit, query.offset);

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut authors = Vec::new();

        while let Some(row) = rows.next()? {
            authors.push(parse_author_row(row)?);
        }

        Ok(authors)
    }

    fn count_authors(&self) -> RepoResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM authors;", [], |row| row.get(0))?;
        count_from_db(AUTHORS_TABLE.name, count)
    }

    fn delete_author(&self, id: AuthorId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM authors WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: AUTHOR_ENTITY,
                id,
            });
        }

        info!("event=author_delete module=repo status=ok author_id={id}");
        Ok(())
    }
}

fn map_write_error(err: rusqlite::Error, name: &str) -> RepoError {
    if is_unique_violation(&err) {
        warn!("event=author_write module=repo status=rejected error_code=duplicate_name");
        return RepoError::Validation(ValidationError::DuplicateAuthorName(name.to_string()));
    }
    err.into()
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(failure, _)
            if failure.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}

fn parse_author_row(row: &Row<'_>) -> RepoResult<Author> {
    let id: AuthorId = row.get("id")?;
    Author::from_storage(
        id,
        row.get("name")?,
        row.get("phone_number")?,
        row.get("created_at")?,
        row.get("updated_at")?,
    )
    .map_err(|err| RepoError::InvalidData(format!("authors row {id}: {err}")))
}
