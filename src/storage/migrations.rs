//! Database migrations for plunge.
//!
//! Each migration upgrades the schema by one version. Migrations run
//! automatically when the database is opened.

use rusqlite::Connection;
use tracing::info;

use crate::error::PlungeError;

/// Current schema version.
const CURRENT_VERSION: i32 = 1;

/// Get the current schema version from the database.
///
/// Returns 0 if no version has been set (new database).
pub fn get_version(conn: &Connection) -> Result<i32, PlungeError> {
    conn.query_row("PRAGMA user_version", [], |row| row.get(0))
        .map_err(|e| PlungeError::Database(format!("Failed to get schema version: {e}")))
}

fn set_version(conn: &Connection, version: i32) -> Result<(), PlungeError> {
    conn.execute_batch(&format!("PRAGMA user_version = {version};"))
        .map_err(|e| PlungeError::Database(format!("Failed to set schema version: {e}")))
}

/// Run all pending migrations.
pub fn run(conn: &Connection) -> Result<(), PlungeError> {
    let current = get_version(conn)?;

    for version in (current + 1)..=CURRENT_VERSION {
        info!(version, "applying database migration");
        run_migration(conn, version)?;
        set_version(conn, version)?;
    }

    Ok(())
}

fn run_migration(conn: &Connection, version: i32) -> Result<(), PlungeError> {
    match version {
        1 => migrate_v1(conn),
        _ => Err(PlungeError::Database(format!(
            "Unknown migration version: {version}"
        ))),
    }
}

/// Migration v1: Initial schema.
///
/// Creates tables for:
/// - `users`: Local user profiles
/// - `user_preferences`: Onboarding answers
/// - `sessions`: Recorded sessions
/// - `app_settings`: Language and theme
fn migrate_v1(conn: &Connection) -> Result<(), PlungeError> {
    conn.execute_batch(
        r"
        CREATE TABLE IF NOT EXISTS users (
            user_id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            email TEXT NOT NULL DEFAULT '',
            picture TEXT NOT NULL DEFAULT '',
            signed_in_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_users_email ON users(email);

        CREATE TABLE IF NOT EXISTS user_preferences (
            user_id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            experience TEXT NOT NULL,
            goals TEXT NOT NULL DEFAULT '[]',
            preferred_duration_secs INTEGER NOT NULL,
            interests TEXT NOT NULL DEFAULT '[]',
            onboarding_completed INTEGER NOT NULL DEFAULT 0
        );

        CREATE TABLE IF NOT EXISTS sessions (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id TEXT NOT NULL,
            duration_secs INTEGER NOT NULL,
            completed_at TEXT NOT NULL,
            kind TEXT NOT NULL,
            technique TEXT,
            temperature REAL,
            mood TEXT,
            notes TEXT,
            intensity TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_sessions_user
        ON sessions(user_id);

        CREATE INDEX IF NOT EXISTS idx_sessions_user_date
        ON sessions(user_id, completed_at);

        CREATE TABLE IF NOT EXISTS app_settings (
            user_id TEXT PRIMARY KEY,
            language TEXT NOT NULL DEFAULT 'en',
            theme TEXT
        );
        ",
    )
    .map_err(|e| PlungeError::Database(format!("Migration v1 failed: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migration_v1() {
        let conn = Connection::open_in_memory().unwrap();
        run(&conn).unwrap();

        assert_eq!(get_version(&conn).unwrap(), CURRENT_VERSION);

        conn.execute(
            "INSERT INTO sessions (user_id, duration_secs, completed_at, kind)
             VALUES ('local', 120, '2024-01-01T10:00:00+00:00', 'ice-bath')",
            [],
        )
        .unwrap();

        conn.execute(
            "INSERT INTO users (user_id, name, signed_in_at)
             VALUES ('local', 'Test', '2024-01-01T10:00:00+00:00')",
            [],
        )
        .unwrap();
    }

    #[test]
    fn test_migration_idempotent() {
        let conn = Connection::open_in_memory().unwrap();

        run(&conn).unwrap();
        run(&conn).unwrap();

        assert_eq!(get_version(&conn).unwrap(), CURRENT_VERSION);
    }

    #[test]
    fn test_get_version_new_database() {
        let conn = Connection::open_in_memory().unwrap();
        assert_eq!(get_version(&conn).unwrap(), 0);
    }
}
