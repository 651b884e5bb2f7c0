//! Repository Layer - Core Traits
//!
//! Store-agnostic interface the SQLite repositories implement. Higher
//! layers depend on this trait, not on a concrete store.

use async_trait::async_trait;

use crate::domain::{DomainResult, Entity};

/// CRUD over a store-backed entity type.
///
/// Async so implementations can suspend at store I/O boundaries; dropping
/// the returned future cancels the call cooperatively.
#[async_trait]
pub trait Repository<T: Entity>: Send + Sync {
    /// Persist a new entity, returning it with its store-assigned id
    async fn create(&self, entity: &T) -> DomainResult<T>;

    /// Fetch one entity by id
    async fn find_by_id(&self, id: T::Id) -> DomainResult<Option<T>>;

    /// Fetch every entity
    async fn list(&self) -> DomainResult<Vec<T>>;

    /// Persist changes to an existing entity
    async fn update(&self, entity: &T) -> DomainResult<T>;

    /// Remove an entity by id
    async fn delete(&self, id: T::Id) -> DomainResult<()>;
}
