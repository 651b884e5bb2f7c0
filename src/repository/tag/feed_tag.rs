//! Feed-Tag Association Operations
//!
//! Reconciliation of the many-to-many relationship between feeds and tags.

use async_trait::async_trait;
use rusqlite::{params, ToSql};

use super::tag_repo::{find_or_create_tag, map_sql_err, row_to_tag, tag_columns};
use crate::domain::{DomainError, DomainResult, Tag};

/// Trait for feed-tag association operations
#[async_trait]
pub trait FeedTagOperations {
    /// Replace a feed's tag set so it matches exactly the distinct names in
    /// `names`, creating tags that don't exist yet.
    async fn set_feed_tags(&self, feed_id: i64, names: &[String]) -> DomainResult<()>;

    /// Get all tags attached to a feed
    async fn tags_for_feed(&self, feed_id: i64) -> DomainResult<Vec<Tag>>;

    /// Get all feeds carrying a specific tag
    async fn feeds_with_tag(&self, tag_id: i64) -> DomainResult<Vec<i64>>;
}

#[async_trait]
impl FeedTagOperations for super::tag_repo::TagRepository {
    /// Runs as one transaction: a failure leaves the feed's association set
    /// untouched. Duplicate names in the input collapse to one association.
    /// An association that already exists (duplicate input, concurrent
    /// writer) is a no-op, not an error.
    async fn set_feed_tags(&self, feed_id: i64, names: &[String]) -> DomainResult<()> {
        if let Some(blank) = names.iter().find(|n| n.trim().is_empty()) {
            return Err(DomainError::InvalidInput(format!(
                "blank tag name {:?} for feed {}",
                blank, feed_id
            )));
        }

        log::debug!("reconciling tags for feed {}: {:?}", feed_id, names);

        let mut conn = self.conn.lock().await;
        let tx = conn.transaction().map_err(map_sql_err)?;

        // Drop associations no longer wanted. Name match happens at delete
        // time against the tags table; an empty input degrades to delete-all.
        if names.is_empty() {
            tx.execute("DELETE FROM feed_to_tag WHERE feed_id = ?", params![feed_id])
                .map_err(map_sql_err)?;
        } else {
            let placeholders = vec!["?"; names.len()].join(", ");
            let sql = format!(
                "DELETE FROM feed_to_tag WHERE feed_id = ? \
                 AND tag_id NOT IN (SELECT id FROM tags WHERE name IN ({}))",
                placeholders
            );
            let mut args: Vec<&dyn ToSql> = vec![&feed_id];
            for name in names {
                args.push(name);
            }
            tx.execute(&sql, args.as_slice()).map_err(map_sql_err)?;
        }

        for name in names {
            let tag_id = find_or_create_tag(&tx, name)?;
            tx.execute(
                "INSERT OR IGNORE INTO feed_to_tag (feed_id, tag_id) VALUES (?, ?)",
                params![feed_id, tag_id],
            )
            .map_err(map_sql_err)?;
        }

        tx.commit().map_err(map_sql_err)
    }

    async fn tags_for_feed(&self, feed_id: i64) -> DomainResult<Vec<Tag>> {
        let conn = self.conn.lock().await;

        let sql = format!(
            "SELECT {} FROM tags t
             JOIN feed_to_tag ft ON t.id = ft.tag_id
             WHERE ft.feed_id = ?
             ORDER BY t.name",
            tag_columns(&conn, "t.")
        );
        let mut stmt = conn.prepare(&sql).map_err(map_sql_err)?;
        let mut rows = stmt.query(params![feed_id]).map_err(map_sql_err)?;

        let mut tags = Vec::new();
        while let Some(row) = rows.next().map_err(map_sql_err)? {
            tags.push(row_to_tag(row)?);
        }
        Ok(tags)
    }

    async fn feeds_with_tag(&self, tag_id: i64) -> DomainResult<Vec<i64>> {
        let conn = self.conn.lock().await;

        let mut stmt = conn
            .prepare("SELECT feed_id FROM feed_to_tag WHERE tag_id = ?")
            .map_err(map_sql_err)?;
        let mut rows = stmt.query(params![tag_id]).map_err(map_sql_err)?;

        let mut feed_ids = Vec::new();
        while let Some(row) = rows.next().map_err(map_sql_err)? {
            feed_ids.push(row.get(0).map_err(map_sql_err)?);
        }
        Ok(feed_ids)
    }
}
