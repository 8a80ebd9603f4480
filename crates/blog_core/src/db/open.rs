//! Opening blog stores.
//!
//! # Responsibility
//! - Open a file-backed or in-memory store and install the blog schema.
//! - Log one `db_open` start event and one outcome event per attempt.
//!
//! # Invariants
//! - Returned connections have `foreign_keys=ON` and a 5s busy timeout.
//! - Returned connections are at `migrations::latest_version()`.
//! - Failures name the store they were opening.

use super::migrations::apply_migrations;
use super::{DbError, DbResult};
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

/// Target label reported for in-memory stores.
pub const MEMORY_TARGET: &str = ":memory:";

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Opens (creating when missing) the blog store at `path`.
///
/// The returned connection is the explicit session handle passed to
/// repositories; there is no process-wide default connection.
///
/// # Errors
/// - `DbError::Open` carrying `path` when SQLite cannot open the file.
/// - `DbError::Migration` / `DbError::UnsupportedSchemaVersion` from schema install.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    let path = path.as_ref();
    open_store(path.display().to_string(), || Connection::open(path))
}

/// Opens a private in-memory blog store.
pub fn open_db_in_memory() -> DbResult<Connection> {
    open_store(MEMORY_TARGET.to_string(), Connection::open_in_memory)
}

fn open_store(
    target: String,
    open: impl FnOnce() -> rusqlite::Result<Connection>,
) -> DbResult<Connection> {
    let started_at = Instant::now();
    info!("event=db_open module=db status=start target={target}");

    let result = open()
        .map_err(|source| DbError::Open {
            target: target.clone(),
            source,
        })
        .and_then(|mut conn| install_schema(&mut conn).map(|()| conn));

    match &result {
        Ok(_) => info!(
            "event=db_open module=db status=ok target={} duration_ms={}",
            target,
            started_at.elapsed().as_millis()
        ),
        Err(err) => error!(
            "event=db_open module=db status=error target={} duration_ms={} error_code={} error={}",
            target,
            started_at.elapsed().as_millis(),
            err.code(),
            err
        ),
    }
    result
}

fn install_schema(conn: &mut Connection) -> DbResult<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(BUSY_TIMEOUT)?;
    apply_migrations(conn)
}
