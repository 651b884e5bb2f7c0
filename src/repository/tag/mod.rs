//! Tag Repository Module
//!
//! This module provides tag repository functionality split into specialized sub-modules:
//! - tag_repo: Core CRUD operations
//! - catalog: denormalized catalog snapshot reads
//! - feed_tag: feed-tag association reconciliation
//! - tag_hierarchy: Tag-Tag relationships (parent-child)

mod catalog;
mod feed_tag;
mod tag_hierarchy;
mod tag_repo;

pub use tag_repo::TagRepository;

// Re-export all operation traits so they can be used by importing TagRepository
pub use catalog::TagCatalogOperations;
pub use feed_tag::FeedTagOperations;
pub use tag_hierarchy::TagHierarchyOperations;
