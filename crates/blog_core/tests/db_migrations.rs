use blog_core::db::migrations::{latest_version, AUTHORS_TABLE, POSTS_TABLE};
use blog_core::db::{open_db, open_db_in_memory, DbError};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "authors");
    assert_table_exists(&conn, "posts");
}

#[test]
fn opening_same_database_twice_keeps_data() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("blog.db");

    let conn_first = open_db(&path).unwrap();
    conn_first
        .execute("INSERT INTO authors (name) VALUES ('Ada');", [])
        .unwrap();
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second), latest_version());
    let count: i64 = conn_second
        .query_row("SELECT COUNT(*) FROM authors;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    match open_db(&path).unwrap_err() {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn open_failure_names_the_store_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("blog.db");

    let err = open_db(&path).unwrap_err();
    assert_eq!(err.code(), "db_open_failed");
    match err {
        DbError::Open { target, .. } => assert_eq!(target, path.display().to_string()),
        other => panic!("unexpected error: {other}"),
    }
    assert!(!path.exists());
}

#[test]
fn failed_migration_reports_its_version_and_rolls_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("legacy.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("CREATE TABLE posts (id INTEGER PRIMARY KEY, title TEXT);")
        .unwrap();
    drop(conn);

    let err = open_db(&path).unwrap_err();
    assert_eq!(err.code(), "db_migration_failed");
    assert!(matches!(err, DbError::Migration { version: 1, .. }));
    assert!(err.to_string().starts_with("blog schema migration 1 failed"));

    let conn = Connection::open(&path).unwrap();
    assert_eq!(schema_version(&conn), 0);
    let authors: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'authors';",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(authors, 0);
}

#[test]
fn migrated_store_has_every_contract_column() {
    let conn = open_db_in_memory().unwrap();

    for contract in [AUTHORS_TABLE, POSTS_TABLE] {
        assert_table_exists(&conn, contract.name);
        for &column in contract.columns {
            let present: i64 = conn
                .query_row(
                    "SELECT COUNT(*) FROM pragma_table_info(?1) WHERE name = ?2;",
                    [contract.name, column],
                    |row| row.get(0),
                )
                .unwrap();
            assert_eq!(present, 1, "column {}.{column} is missing", contract.name);
        }
    }
}

#[test]
fn authors_name_column_is_unique() {
    let conn = open_db_in_memory().unwrap();
    conn.execute("INSERT INTO authors (name) VALUES ('Ada');", [])
        .unwrap();

    let duplicate = conn.execute("INSERT INTO authors (name) VALUES ('Ada');", []);
    assert!(duplicate.is_err());
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
