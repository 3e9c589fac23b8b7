//! Database schema migrations.

use rusqlite::Connection;
use tracing::info;

use parley_core::ParleyError;

/// Run all pending database migrations.
pub fn run_migrations(conn: &Connection) -> Result<(), ParleyError> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version     INTEGER PRIMARY KEY NOT NULL,
            name        TEXT NOT NULL,
            applied_at  INTEGER NOT NULL DEFAULT (strftime('%s', 'now'))
        );",
    )
    .map_err(|e| ParleyError::Storage(format!("Failed to create migrations table: {}", e)))?;

    let current_version = current_version(conn)?;

    if current_version < 1 {
        apply_v1(conn)?;
        info!("Applied migration v1: chat_records");
    }

    Ok(())
}

pub fn current_version(conn: &Connection) -> Result<i64, ParleyError> {
    conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_migrations",
        [],
        |row| row.get(0),
    )
    .map_err(|e| ParleyError::Storage(format!("Failed to query migration version: {}", e)))
}

/// Version 1: chat history.
fn apply_v1(conn: &Connection) -> Result<(), ParleyError> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS chat_records (
            id          TEXT PRIMARY KEY NOT NULL,
            user_id     TEXT NOT NULL,
            message     TEXT NOT NULL,
            response    TEXT NOT NULL,
            intent      TEXT
                        CHECK (intent IS NULL OR intent IN
                               ('weather', 'time', 'math', 'knowledge', 'general')),
            timestamp   INTEGER NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_chat_records_user_time
            ON chat_records (user_id, timestamp DESC);

        INSERT INTO schema_migrations (version, name) VALUES (1, 'chat_records');
        ",
    )
    .map_err(|e| ParleyError::Storage(format!("Migration v1 failed: {}", e)))
}
