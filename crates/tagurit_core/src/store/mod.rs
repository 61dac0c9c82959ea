//! Sync boundary contract toward the persistence store.
//!
//! # Responsibility
//! - Define the synchronous create/update/delete exchange the catalog
//!   delegates persistence intents to.
//! - Provide the in-memory reference store used by tests and the probe
//!   binary.
//!
//! # Invariants
//! - `insert` assigns every row a fresh identifier, never reused.
//! - Calls are atomic request/response exchanges; retry and timeout
//!   policy belong to the boundary implementation, not the core.

use crate::model::item::ItemId;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod memory;

pub use memory::{MemoryStore, StoredRow};

pub type StoreResult<T> = Result<T, StoreError>;

/// Failure reported by a sync boundary call.
#[derive(Debug)]
pub enum StoreError {
    /// The id is unknown to the store.
    NotFound(ItemId),
    /// Backend-specific failure, surfaced unchanged to the caller.
    Backend(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "item not found in store: {id}"),
            Self::Backend(message) => write!(f, "store backend failure: {message}"),
        }
    }
}

impl Error for StoreError {}

/// Persistence boundary consumed by the catalog.
///
/// Tags cross this boundary in the flat space-delimited form so a plain
/// substring match against `" tag "` works on the stored column.
pub trait SyncStore {
    /// Persists a new row and returns its assigned id.
    fn insert(&mut self, title: &str, url: &str, notes: &str, tags: &str)
        -> StoreResult<ItemId>;

    /// Rewrites an existing row in full.
    ///
    /// # Errors
    /// - [`StoreError::NotFound`] when `id` is unknown to the store.
    fn update(
        &mut self,
        id: ItemId,
        title: &str,
        url: &str,
        notes: &str,
        tags: &str,
    ) -> StoreResult<()>;

    /// Removes a row.
    ///
    /// # Errors
    /// - [`StoreError::NotFound`] when `id` is unknown to the store.
    fn delete(&mut self, id: ItemId) -> StoreResult<()>;
}
