//! Tag Entity
//!
//! Tags can be attached to feeds for categorization and filtering,
//! and may optionally point at a parent tag (one-level hierarchy).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::entity::Entity;

/// A tag for categorizing feeds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    /// Unique identifier (store-assigned, stable for the tag's lifetime)
    pub id: i64,
    /// Tag name, the natural key used for find-or-create
    pub name: String,
    /// Parent tag id, when the schema carries the hierarchy column
    pub parent_id: Option<i64>,
}

impl Tag {
    pub fn new(id: i64, name: String) -> Self {
        Self {
            id,
            name,
            parent_id: None,
        }
    }

    pub fn with_parent(id: i64, name: String, parent_id: i64) -> Self {
        Self {
            id,
            name,
            parent_id: Some(parent_id),
        }
    }
}

impl Entity for Tag {
    type Id = i64;

    fn id(&self) -> Self::Id {
        self.id
    }
}

/// Point-in-time snapshot of the whole tag catalog.
///
/// Built by `TagCatalogOperations::catalog` from three independent reads;
/// never mutated afterwards. The `names`/`feed_tags`/`parents` field names
/// are the JSON contract an API layer re-serializes verbatim. A read that
/// failed partway leaves its entry in `warnings` so callers can tell a
/// degraded snapshot from an empty store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TagCatalog {
    /// tag id -> tag name
    pub names: HashMap<i64, String>,
    /// feed id -> ids of the tags attached to it (order not significant)
    pub feed_tags: HashMap<i64, Vec<i64>>,
    /// child tag id -> parent tag id; empty when the schema has no hierarchy
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub parents: HashMap<i64, i64>,
    /// Reads that failed after earlier reads had populated the snapshot
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl TagCatalog {
    /// True when every read completed
    pub fn is_complete(&self) -> bool {
        self.warnings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_creation() {
        let tag = Tag::new(1, "news".to_string());
        assert_eq!(tag.id(), 1);
        assert_eq!(tag.name, "news");
        assert!(tag.parent_id.is_none());
    }

    #[test]
    fn test_tag_with_parent() {
        let tag = Tag::with_parent(5, "tech".to_string(), 2);
        assert_eq!(tag.parent_id, Some(2));
    }

    #[test]
    fn test_catalog_defaults_complete() {
        let catalog = TagCatalog::default();
        assert!(catalog.is_complete());
        assert!(catalog.names.is_empty());
    }
}
