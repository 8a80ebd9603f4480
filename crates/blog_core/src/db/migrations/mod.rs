//! Blog schema: ordered migrations and the table contract repositories rely on.
//!
//! # Responsibility
//! - Install the `authors` and `posts` tables step by step.
//! - Publish the column set each repository requires (`AUTHORS_TABLE`, `POSTS_TABLE`).
//!
//! # Invariants
//! - Step versions are strictly increasing and mirrored to `PRAGMA user_version`.
//! - Pending steps run in one transaction; a failing step applies nothing.
//! - Table and column names are a drop-in contract and never renamed.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::Connection;

/// Tables and columns a migrated blog store is guaranteed to have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableContract {
    pub name: &'static str,
    pub columns: &'static [&'static str],
}

pub const AUTHORS_TABLE: TableContract = TableContract {
    name: "authors",
    columns: &["id", "name", "phone_number", "created_at", "updated_at"],
};

pub const POSTS_TABLE: TableContract = TableContract {
    name: "posts",
    columns: &[
        "id",
        "title",
        "content",
        "category",
        "summary",
        "created_at",
        "updated_at",
    ],
};

/// `(version, sql)` steps applied in order.
const SCHEMA_STEPS: &[(u32, &str)] = &[(1, include_str!("0001_init.sql"))];

/// Returns the schema version this build installs.
pub fn latest_version() -> u32 {
    SCHEMA_STEPS.last().map_or(0, |(version, _)| *version)
}

/// Reads the schema version recorded in the store.
pub fn current_user_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?)
}

/// Brings the store up to `latest_version()`.
///
/// # Errors
/// - `DbError::UnsupportedSchemaVersion` when the store is ahead of this build.
/// - `DbError::Migration` naming the step that failed; the version is unchanged.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let from_version = current_user_version(conn)?;
    let latest = latest_version();

    if from_version > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: from_version,
            latest_supported: latest,
        });
    }
    if from_version == latest {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for &(version, sql) in SCHEMA_STEPS
        .iter()
        .filter(|(version, _)| *version > from_version)
    {
        tx.execute_batch(sql)
            .and_then(|()| tx.pragma_update(None, "user_version", version))
            .map_err(|source| DbError::Migration { version, source })?;
    }
    tx.commit()?;

    info!(
        "event=db_migrate module=db status=ok from_version={} to_version={}",
        from_version, latest
    );
    Ok(())
}

