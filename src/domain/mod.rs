//! Domain Layer
//!
//! Contains all domain entities and core abstractions.
//! This layer has NO external dependencies (except serde for serialization).

mod entity;
mod tag;

pub use entity::{DomainError, DomainResult, Entity};
pub use tag::{Tag, TagCatalog};
