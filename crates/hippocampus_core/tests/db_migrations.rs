use hippocampus_core::db::migrations::latest_version;
use hippocampus_core::db::{open_db, open_db_in_memory, DbError};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "entries");
    assert_table_exists(&conn, "days");
}

#[test]
fn bootstrap_enables_foreign_keys_and_busy_timeout() {
    let conn = open_db_in_memory().unwrap();

    let foreign_keys: i64 = conn
        .query_row("PRAGMA foreign_keys;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(foreign_keys, 1);

    let busy_timeout: i64 = conn
        .query_row("PRAGMA busy_timeout;", [], |row| row.get(0))
        .unwrap();
    assert!(busy_timeout > 0);
}

#[test]
fn entries_table_rejects_missing_title_and_date() {
    let conn = open_db_in_memory().unwrap();

    assert!(conn
        .execute("INSERT INTO entries (date_ref) VALUES ('2024-01-01');", [])
        .is_err());
    assert!(conn
        .execute("INSERT INTO entries (title) VALUES ('Day 1');", [])
        .is_err());
    assert!(conn
        .execute(
            "INSERT INTO entries (title, date_ref) VALUES ('   ', '2024-01-01');",
            [],
        )
        .is_err());
    conn.execute(
        "INSERT INTO entries (title, date_ref) VALUES ('Day 1', '2024-01-01');",
        [],
    )
    .unwrap();

    let pin: i64 = conn
        .query_row("SELECT pin FROM entries WHERE _id = 1;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(pin, 0);
}

#[test]
fn days_table_keeps_one_row_per_date() {
    let conn = open_db_in_memory().unwrap();

    conn.execute("INSERT INTO days (day_date) VALUES ('2024-01-01');", [])
        .unwrap();
    assert!(conn
        .execute("INSERT INTO days (day_date) VALUES ('2024-01-01');", [])
        .is_err());
}

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("journal.db");

    let conn_first = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_first), latest_version());
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second), latest_version());
    assert_table_exists(&conn_second, "entries");
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_db(&path).unwrap_err();
    match err {
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
