//! Tag Repository - Core CRUD Operations
//!
//! SQLite-backed implementation for Tag CRUD operations.
//! Specialized operations are in separate modules:
//! - feed_tag: feed-tag association reconciliation
//! - catalog: denormalized catalog snapshot reads
//! - tag_hierarchy: tag-tag relationships (parent-child)

use std::sync::Arc;

use async_trait::async_trait;
use rusqlite::{params, Connection, ErrorCode};
use tokio::sync::Mutex;

use super::super::db::column_exists;
use super::super::traits::Repository;
use crate::domain::{DomainError, DomainResult, Tag};

/// SQLite implementation of the Tag repository.
///
/// The mutex serializes all statements issued through one handle, which
/// also makes each multi-statement write operation atomic with respect to
/// other callers of the same repository.
pub struct TagRepository {
    pub(super) conn: Arc<Mutex<Connection>>,
}

impl TagRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// Look up a tag by its name (the natural key)
    pub async fn find_by_name(&self, name: &str) -> DomainResult<Option<Tag>> {
        let conn = self.conn.lock().await;

        let sql = format!("SELECT {} FROM tags WHERE name = ?", tag_columns(&conn, ""));
        let mut stmt = conn.prepare(&sql).map_err(map_sql_err)?;
        let mut rows = stmt.query(params![name]).map_err(map_sql_err)?;

        match rows.next().map_err(map_sql_err)? {
            Some(row) => Ok(Some(row_to_tag(row)?)),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl Repository<Tag> for TagRepository {
    async fn create(&self, entity: &Tag) -> DomainResult<Tag> {
        let conn = self.conn.lock().await;

        conn.execute(
            "INSERT INTO tags (name, created_at) VALUES (?, ?)",
            params![entity.name, chrono::Utc::now().timestamp_millis()],
        )
        .map_err(map_sql_err)?;

        let mut tag = entity.clone();
        tag.id = conn.last_insert_rowid();
        Ok(tag)
    }

    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Tag>> {
        let conn = self.conn.lock().await;

        let sql = format!("SELECT {} FROM tags WHERE id = ?", tag_columns(&conn, ""));
        let mut stmt = conn.prepare(&sql).map_err(map_sql_err)?;
        let mut rows = stmt.query(params![id]).map_err(map_sql_err)?;

        match rows.next().map_err(map_sql_err)? {
            Some(row) => Ok(Some(row_to_tag(row)?)),
            None => Ok(None),
        }
    }

    async fn list(&self) -> DomainResult<Vec<Tag>> {
        let conn = self.conn.lock().await;

        let sql = format!("SELECT {} FROM tags ORDER BY name", tag_columns(&conn, ""));
        let mut stmt = conn.prepare(&sql).map_err(map_sql_err)?;
        let mut rows = stmt.query([]).map_err(map_sql_err)?;

        let mut tags = Vec::new();
        while let Some(row) = rows.next().map_err(map_sql_err)? {
            tags.push(row_to_tag(row)?);
        }
        Ok(tags)
    }

    /// Rename a tag. The parent link is managed by `TagHierarchyOperations`
    /// and left untouched here.
    async fn update(&self, entity: &Tag) -> DomainResult<Tag> {
        let conn = self.conn.lock().await;

        let changed = conn
            .execute(
                "UPDATE tags SET name = ? WHERE id = ?",
                params![entity.name, entity.id],
            )
            .map_err(map_sql_err)?;
        if changed == 0 {
            return Err(DomainError::NotFound(format!("tag {}", entity.id)));
        }

        Ok(entity.clone())
    }

    /// Hard delete. The tag's association rows go with it in the same
    /// transaction; children keeping a dangling parent_id is the caller's
    /// concern.
    async fn delete(&self, id: i64) -> DomainResult<()> {
        let mut conn = self.conn.lock().await;

        let tx = conn.transaction().map_err(map_sql_err)?;
        tx.execute("DELETE FROM feed_to_tag WHERE tag_id = ?", params![id])
            .map_err(map_sql_err)?;
        tx.execute("DELETE FROM tags WHERE id = ?", params![id])
            .map_err(map_sql_err)?;
        tx.commit().map_err(map_sql_err)?;

        Ok(())
    }
}

/// Column list for tag selects, with an optional table alias prefix. The
/// hierarchy column is only present in the hierarchy schema variant, so
/// base-variant stores select a NULL in its place.
pub(super) fn tag_columns(conn: &Connection, alias: &str) -> String {
    if column_exists(conn, "tags", "parent_id") {
        format!("{a}id, {a}name, {a}parent_id", a = alias)
    } else {
        format!("{a}id, {a}name, NULL", a = alias)
    }
}

/// Convert a database row to Tag
pub(super) fn row_to_tag(row: &rusqlite::Row) -> DomainResult<Tag> {
    Ok(Tag {
        id: row.get(0).map_err(map_sql_err)?,
        name: row.get(1).map_err(map_sql_err)?,
        parent_id: row.get(2).map_err(map_sql_err)?,
    })
}

/// Map a store error into the domain, keeping constraint violations (expected
/// under races) distinguishable from infrastructure failures.
pub(super) fn map_sql_err(e: rusqlite::Error) -> DomainError {
    match &e {
        rusqlite::Error::SqliteFailure(err, _) if err.code == ErrorCode::ConstraintViolation => {
            DomainError::Conflict(e.to_string())
        }
        _ => DomainError::Internal(e.to_string()),
    }
}

/// Find-or-create keyed by name, as two statements: a conflict-ignore insert
/// followed by the id lookup. Two callers racing on a new name both land on
/// the same row. Runs against the caller's connection (or open transaction).
pub(super) fn find_or_create_tag(conn: &Connection, name: &str) -> DomainResult<i64> {
    conn.execute(
        "INSERT OR IGNORE INTO tags (name, created_at) VALUES (?, ?)",
        params![name, chrono::Utc::now().timestamp_millis()],
    )
    .map_err(map_sql_err)?;

    conn.query_row("SELECT id FROM tags WHERE name = ?", params![name], |row| {
        row.get(0)
    })
    .map_err(map_sql_err)
}
