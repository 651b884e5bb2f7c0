//! Tag Hierarchy Operations
//!
//! Parent-child relationships between tags, stored as a nullable
//! `parent_id` column on the tags table (hierarchy schema variant only).

use async_trait::async_trait;
use rusqlite::params;

use super::tag_repo::{map_sql_err, row_to_tag, tag_columns};
use crate::domain::{DomainError, DomainResult, Tag};
use crate::repository::db::column_exists;

/// Trait for tag hierarchy operations
#[async_trait]
pub trait TagHierarchyOperations {
    /// Set a tag's parent, or clear it with `None`
    async fn set_parent(&self, tag_id: i64, parent: Option<i64>) -> DomainResult<()>;

    /// Get all child tags of a given parent tag
    async fn child_tags(&self, parent_id: i64) -> DomainResult<Vec<Tag>>;
}

#[async_trait]
impl TagHierarchyOperations for super::tag_repo::TagRepository {
    /// Single-row update. Self-parenting is rejected; whether the parent
    /// exists, and whether the link closes a longer cycle, is not checked.
    async fn set_parent(&self, tag_id: i64, parent: Option<i64>) -> DomainResult<()> {
        if parent == Some(tag_id) {
            return Err(DomainError::InvalidInput(format!(
                "tag {} cannot be its own parent",
                tag_id
            )));
        }

        let conn = self.conn.lock().await;
        if !column_exists(&conn, "tags", "parent_id") {
            return Err(DomainError::InvalidInput(
                "tag hierarchy not supported by this schema".to_string(),
            ));
        }

        let changed = conn
            .execute(
                "UPDATE tags SET parent_id = ? WHERE id = ?",
                params![parent, tag_id],
            )
            .map_err(map_sql_err)?;
        if changed == 0 {
            return Err(DomainError::NotFound(format!("tag {}", tag_id)));
        }

        Ok(())
    }

    async fn child_tags(&self, parent_id: i64) -> DomainResult<Vec<Tag>> {
        let conn = self.conn.lock().await;
        if !column_exists(&conn, "tags", "parent_id") {
            return Err(DomainError::InvalidInput(
                "tag hierarchy not supported by this schema".to_string(),
            ));
        }

        let sql = format!(
            "SELECT {} FROM tags WHERE parent_id = ? ORDER BY name",
            tag_columns(&conn, "")
        );
        let mut stmt = conn.prepare(&sql).map_err(map_sql_err)?;
        let mut rows = stmt.query(params![parent_id]).map_err(map_sql_err)?;

        let mut tags = Vec::new();
        while let Some(row) = rows.next().map_err(map_sql_err)? {
            tags.push(row_to_tag(row)?);
        }
        Ok(tags)
    }
}
