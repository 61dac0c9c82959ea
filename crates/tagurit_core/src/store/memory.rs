//! In-memory reference implementation of the sync boundary.

use super::{StoreError, StoreResult, SyncStore};
use crate::model::item::ItemId;
use std::collections::BTreeMap;
use uuid::Uuid;

/// One persisted row, fields in boundary (flat-tag) form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredRow {
    pub title: String,
    pub url: String,
    pub notes: String,
    pub tags: String,
}

/// Map-backed store minting fresh ids on insert.
///
/// Exists so catalog behavior is exercisable without any persistence
/// layer; not a durability mechanism.
#[derive(Debug, Default)]
pub struct MemoryStore {
    rows: BTreeMap<ItemId, StoredRow>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns one row by id, mainly for test assertions.
    pub fn row(&self, id: ItemId) -> Option<&StoredRow> {
        self.rows.get(&id)
    }
}

impl SyncStore for MemoryStore {
    fn insert(
        &mut self,
        title: &str,
        url: &str,
        notes: &str,
        tags: &str,
    ) -> StoreResult<ItemId> {
        let id = Uuid::new_v4();
        self.rows.insert(
            id,
            StoredRow {
                title: title.to_string(),
                url: url.to_string(),
                notes: notes.to_string(),
                tags: tags.to_string(),
            },
        );
        Ok(id)
    }

    fn update(
        &mut self,
        id: ItemId,
        title: &str,
        url: &str,
        notes: &str,
        tags: &str,
    ) -> StoreResult<()> {
        let row = self.rows.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        row.title = title.to_string();
        row.url = url.to_string();
        row.notes = notes.to_string();
        row.tags = tags.to_string();
        Ok(())
    }

    fn delete(&mut self, id: ItemId) -> StoreResult<()> {
        if self.rows.remove(&id).is_none() {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }
}
