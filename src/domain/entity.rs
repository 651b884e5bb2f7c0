//! Core entity contract and the error taxonomy of the data layer.
//!
//! Everything the repositories hand back funnels through `DomainError`,
//! so callers can tell an expected constraint conflict from a broken store.

/// Contract for store-backed entities: a stable, store-assigned identifier
pub trait Entity: Sized + Send + Sync + Clone {
    /// Identifier type, stable for the entity's lifetime
    type Id: Copy + Eq + std::hash::Hash + Send + Sync;

    /// The store-assigned identifier
    fn id(&self) -> Self::Id;
}

/// Result type used throughout the data layer
pub type DomainResult<T> = Result<T, DomainError>;

/// Failures surfaced by the tag data layer.
///
/// `Conflict` carries store constraint violations, which are expected under
/// concurrent writers and must stay distinguishable from infrastructure
/// faults (`Internal`).
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    NotFound(String),
    InvalidInput(String),
    Conflict(String),
    Internal(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DomainError::NotFound(msg) => write!(f, "not found: {}", msg),
            DomainError::InvalidInput(msg) => write!(f, "invalid input: {}", msg),
            DomainError::Conflict(msg) => write!(f, "conflict: {}", msg),
            DomainError::Internal(msg) => write!(f, "storage error: {}", msg),
        }
    }
}

impl std::error::Error for DomainError {}
