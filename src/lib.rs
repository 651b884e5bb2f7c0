//! feed-tags: tag-management data layer for a feed aggregation backend.
//!
//! Layered architecture:
//! - domain: Core entities and business rules
//! - repository: Data access abstractions and SQLite implementations
//!
//! All state lives in the relational store; the repository holds no
//! long-lived in-memory state between calls. Operations are async and
//! cancellable by dropping the future; callers impose timeouts by wrapping
//! the returned futures.

pub mod domain;
pub mod repository;

pub use domain::{DomainError, DomainResult, Tag, TagCatalog};
pub use repository::{
    init_db, FeedTagOperations, Repository, TagCatalogOperations, TagHierarchyOperations,
    TagRepository,
};
