//! Database Connection and Setup
//!
//! Manages the SQLite database connection and migrations.

use std::path::Path;

use rusqlite::Connection;

use crate::domain::{DomainError, DomainResult};

/// Open (or create) the database at `db_path` and bring its schema up to date.
///
/// `":memory:"` works as a path for tests. A store that was already
/// schema-initialized elsewhere passes through unchanged: every migration is
/// guarded by an existence check.
pub fn init_db(db_path: &Path) -> DomainResult<Connection> {
    let conn = Connection::open(db_path)
        .map_err(|e| DomainError::Internal(format!("Failed to open db: {}", e)))?;

    run_migrations(&conn)?;

    Ok(conn)
}

/// Check if a column exists in a table
pub fn column_exists(conn: &Connection, table: &str, column: &str) -> bool {
    let query = format!("PRAGMA table_info({})", table);
    let Ok(mut stmt) = conn.prepare(&query) else {
        return false;
    };
    let Ok(mut rows) = stmt.query([]) else {
        return false;
    };
    while let Ok(Some(row)) = rows.next() {
        if let Ok(name) = row.get::<_, String>(1) {
            if name == column {
                return true;
            }
        }
    }
    false
}

/// Run database migrations
fn run_migrations(conn: &Connection) -> DomainResult<()> {
    // Feeds are owned by the fetching subsystem; only the id matters here,
    // but the table must exist for the association's foreign key.
    conn.execute(
        "CREATE TABLE IF NOT EXISTS feeds (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            url TEXT NOT NULL UNIQUE,
            title TEXT,
            created_at INTEGER NOT NULL DEFAULT 0
        )",
        [],
    )
    .map_err(|e| DomainError::Internal(e.to_string()))?;

    // UNIQUE(name) backs the conflict-ignore find-or-create.
    conn.execute(
        "CREATE TABLE IF NOT EXISTS tags (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE,
            created_at INTEGER NOT NULL DEFAULT 0
        )",
        [],
    )
    .map_err(|e| DomainError::Internal(e.to_string()))?;

    // Hierarchy migration: add the parent column if it doesn't exist
    if !column_exists(conn, "tags", "parent_id") {
        conn.execute("ALTER TABLE tags ADD COLUMN parent_id INTEGER", [])
            .map_err(|e| DomainError::Internal(format!("Failed to add parent_id: {}", e)))?;
    }

    conn.execute(
        "CREATE TABLE IF NOT EXISTS feed_to_tag (
            feed_id INTEGER NOT NULL REFERENCES feeds(id),
            tag_id INTEGER NOT NULL REFERENCES tags(id),
            UNIQUE(feed_id, tag_id)
        )",
        [],
    )
    .map_err(|e| DomainError::Internal(e.to_string()))?;

    // Index for faster tag-to-feeds lookups
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_feed_to_tag_tag ON feed_to_tag(tag_id)",
        [],
    )
    .map_err(|e| DomainError::Internal(e.to_string()))?;

    Ok(())
}
