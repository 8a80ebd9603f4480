//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define record-oriented data access contracts for authors and posts.
//! - Isolate SQLite query details from service orchestration.
//! - Enforce cross-record rules (author name uniqueness) at write time.
//!
//! # Invariants
//! - Repositories only operate on connections migrated to `latest_version()`.
//! - Every repository borrows an explicit connection handle; there is no
//!   shared default session.
//! - Read paths reject invalid persisted rows instead of masking them.

use crate::db::migrations::{current_user_version, latest_version, TableContract};
use crate::db::DbError;
use crate::model::validation::ValidationError;
use rusqlite::types::Value;
use rusqlite::Connection;
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod author_repo;
pub mod post_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for record persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(ValidationError),
    Db(DbError),
    NotFound {
        entity: &'static str,
        id: i64,
    },
    /// Update or delete requested for a record storage never assigned an id.
    NotPersisted(&'static str),
    /// Create requested for a record that already carries a storage id.
    AlreadyPersisted {
        entity: &'static str,
        id: i64,
    },
    InvalidData(String),
    SchemaVersionMismatch {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::NotPersisted(entity) => write!(f, "{entity} has not been persisted yet"),
            Self::AlreadyPersisted { entity, id } => {
                write!(f, "{entity} {id} is already persisted")
            }
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
            Self::SchemaVersionMismatch {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}"
            ),
            Self::MissingRequiredTable(table) => write!(f, "required table `{table}` is missing"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{table}.{column}` is missing")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Verifies schema version, table and columns before a repository is built.
pub(crate) fn ensure_connection_ready(
    conn: &Connection,
    contract: &TableContract,
) -> RepoResult<()> {
    let table = contract.name;
    let expected_version = latest_version();
    let actual_version = current_user_version(conn)?;
    if actual_version != expected_version {
        return Err(RepoError::SchemaVersionMismatch {
            expected_version,
            actual_version,
        });
    }

    let table_exists: bool = conn.query_row(
        "SELECT EXISTS(
            SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    if !table_exists {
        return Err(RepoError::MissingRequiredTable(table));
    }

    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info(?1);")?;
    let present = stmt
        .query_map([table], |row| row.get::<_, String>(0))?
        .collect::<Result<HashSet<_>, _>>()?;
    for &column in contract.columns {
        if !present.contains(column) {
            return Err(RepoError::MissingRequiredColumn { table, column });
        }
    }

    Ok(())
}

/// Appends `LIMIT`/`OFFSET` clauses and their bind values.
pub(crate) fn push_pagination(
    sql: &mut String,
    bind_values: &mut Vec<Value>,
    limit: Option<u32>,
    offset: u32,
) {
    if let Some(limit) = limit {
        sql.push_str(" LIMIT ?");
        bind_values.push(Value::Integer(i64::from(limit)));
        if offset > 0 {
            sql.push_str(" OFFSET ?");
            bind_values.push(Value::Integer(i64::from(offset)));
        }
    } else if offset > 0 {
        sql.push_str(" LIMIT -1 OFFSET ?");
        bind_values.push(Value::Integer(i64::from(offset)));
    }
}

/// Converts a `COUNT(*)` result into an unsigned count.
pub(crate) fn count_from_db(table: &str, value: i64) -> RepoResult<u64> {
    u64::try_from(value)
        .map_err(|_| RepoError::InvalidData(format!("negative row count `{value}` for {table}")))
}

#[cfg(test)]
mod tests {
    use super::push_pagination;
    use rusqlite::types::Value;

    #[test]
    fn pagination_without_limit_uses_open_ended_limit() {
        let mut sql = String::from("SELECT 1");
        let mut binds = Vec::new();
        push_pagination(&mut sql, &mut binds, None, 3);
        assert_eq!(sql, "SELECT 1 LIMIT -1 OFFSET ?");
        assert_eq!(binds, vec![Value::Integer(3)]);
    }

    #[test]
    fn pagination_skips_zero_offset() {
        let mut sql = String::from("SELECT 1");
        let mut binds = Vec::new();
        push_pagination(&mut sql, &mut binds, Some(5), 0);
        assert_eq!(sql, "SELECT 1 LIMIT ?");
        assert_eq!(binds, vec![Value::Integer(5)]);
    }
}
