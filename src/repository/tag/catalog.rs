//! Tag Catalog Snapshot Reads
//!
//! Builds the denormalized catalog view (tag names, feed associations,
//! parent links) that API callers re-serialize verbatim.

use async_trait::async_trait;
use rusqlite::Connection;

use super::tag_repo::map_sql_err;
use crate::domain::{DomainResult, TagCatalog};
use crate::repository::db::column_exists;

/// Trait for catalog snapshot operations
#[async_trait]
pub trait TagCatalogOperations {
    /// Materialize a point-in-time view of all tags, all feed associations
    /// and (hierarchy variant) all parent links.
    async fn catalog(&self) -> TagCatalog;
}

#[async_trait]
impl TagCatalogOperations for super::tag_repo::TagRepository {
    /// Three independent reads with no isolation across them; a concurrent
    /// write between reads can leave the maps momentarily inconsistent and
    /// callers re-fetch on demand. A failed read ends that segment only:
    /// whatever was gathered stays in the snapshot and the failure is kept
    /// in `warnings` instead of being swallowed.
    async fn catalog(&self) -> TagCatalog {
        let conn = self.conn.lock().await;
        let mut catalog = TagCatalog::default();

        if column_exists(&conn, "tags", "parent_id") {
            if let Err(e) = read_parents(&conn, &mut catalog) {
                log::warn!("tag catalog: parents read failed: {}", e);
                catalog.warnings.push(format!("parents: {}", e));
            }
        }

        if let Err(e) = read_names(&conn, &mut catalog) {
            log::warn!("tag catalog: names read failed: {}", e);
            catalog.warnings.push(format!("names: {}", e));
        }

        if let Err(e) = read_feed_tags(&conn, &mut catalog) {
            log::warn!("tag catalog: associations read failed: {}", e);
            catalog.warnings.push(format!("feed_tags: {}", e));
        }

        catalog
    }
}

fn read_parents(conn: &Connection, catalog: &mut TagCatalog) -> DomainResult<()> {
    let mut stmt = conn
        .prepare("SELECT id, parent_id FROM tags WHERE parent_id IS NOT NULL")
        .map_err(map_sql_err)?;
    let mut rows = stmt.query([]).map_err(map_sql_err)?;

    while let Some(row) = rows.next().map_err(map_sql_err)? {
        let id: i64 = row.get(0).map_err(map_sql_err)?;
        let parent: i64 = row.get(1).map_err(map_sql_err)?;
        catalog.parents.insert(id, parent);
    }
    Ok(())
}

fn read_names(conn: &Connection, catalog: &mut TagCatalog) -> DomainResult<()> {
    let mut stmt = conn
        .prepare("SELECT id, name FROM tags")
        .map_err(map_sql_err)?;
    let mut rows = stmt.query([]).map_err(map_sql_err)?;

    while let Some(row) = rows.next().map_err(map_sql_err)? {
        let id: i64 = row.get(0).map_err(map_sql_err)?;
        let name: String = row.get(1).map_err(map_sql_err)?;
        catalog.names.insert(id, name);
    }
    Ok(())
}

fn read_feed_tags(conn: &Connection, catalog: &mut TagCatalog) -> DomainResult<()> {
    let mut stmt = conn
        .prepare("SELECT feed_id, tag_id FROM feed_to_tag")
        .map_err(map_sql_err)?;
    let mut rows = stmt.query([]).map_err(map_sql_err)?;

    while let Some(row) = rows.next().map_err(map_sql_err)? {
        let feed_id: i64 = row.get(0).map_err(map_sql_err)?;
        let tag_id: i64 = row.get(1).map_err(map_sql_err)?;
        catalog.feed_tags.entry(feed_id).or_default().push(tag_id);
    }
    Ok(())
}
