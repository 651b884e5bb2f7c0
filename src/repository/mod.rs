//! Repository Layer
//!
//! Data access abstractions and implementations.

mod db;
pub mod tag;
mod traits;


pub use db::{column_exists, init_db};
pub use tag::{FeedTagOperations, TagCatalogOperations, TagHierarchyOperations, TagRepository};
pub use traits::Repository;
