//! Item catalog and known-tag vocabulary.
//!
//! # Responsibility
//! - Own the collection of items, ordered case-insensitively by title.
//! - Maintain the running vocabulary of known tags.
//! - Detect duplicate urls and delegate persistence intents to the sync
//!   boundary.
//!
//! # Invariants
//! - No two items share a canonicalized url.
//! - The vocabulary is a superset of the union of all item tag sets; it
//!   never shrinks while the catalog lives.
//! - In-memory state changes only after the boundary call succeeded, so
//!   a failed operation leaves prior state intact.

use crate::model::item::{canonicalize_url, Item, ItemId, ItemValidationError};
use crate::store::{StoreError, SyncStore};
use crate::tags;
use log::info;
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Catalog operation failure.
#[derive(Debug)]
pub enum CatalogError {
    /// Save-time field requirements not met; no state change.
    Validation(ItemValidationError),
    /// Creating would collide with an existing canonicalized url.
    DuplicateUrl(String),
    /// No item with this id in the catalog or the store.
    NotFound(ItemId),
    /// Sync boundary failure, surfaced unchanged.
    Store(StoreError),
}

impl Display for CatalogError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::DuplicateUrl(url) => write!(f, "url already stored: {url}"),
            Self::NotFound(id) => write!(f, "item not found: {id}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for CatalogError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Store(err) => Some(err),
            Self::DuplicateUrl(_) | Self::NotFound(_) => None,
        }
    }
}

impl From<ItemValidationError> for CatalogError {
    fn from(value: ItemValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StoreError> for CatalogError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::NotFound(id) => Self::NotFound(id),
            other => Self::Store(other),
        }
    }
}

/// Read-only row handed to the export sink.
///
/// The sink owns escaping and timestamping; the catalog's only contract
/// is the case-insensitive title ordering of the sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRecord {
    pub title: String,
    pub url: String,
    pub notes: String,
    /// Flat space-delimited tag form.
    pub tags: String,
}

/// Exclusive owner of all items and of the known-tag vocabulary.
///
/// Mutations flow through the sync boundary first; consumers re-read
/// state after a change notification instead of holding references
/// across mutations.
pub struct Catalog<S: SyncStore> {
    store: S,
    items: Vec<Item>,
    known_tags: BTreeSet<String>,
    listeners: Vec<Box<dyn Fn()>>,
}

impl<S: SyncStore> Catalog<S> {
    /// Creates an empty catalog delegating persistence to `store`.
    pub fn new(store: S) -> Self {
        Self {
            store,
            items: Vec::new(),
            known_tags: BTreeSet::new(),
            listeners: Vec::new(),
        }
    }

    /// Bulk-initializes the catalog from already-persisted items.
    ///
    /// Replaces any previous content; the vocabulary is re-seeded from
    /// the union of all loaded tag sets.
    pub fn load(&mut self, items: Vec<Item>) {
        self.items = items;
        self.sort_items();
        self.known_tags = self
            .items
            .iter()
            .flat_map(|item| item.tags.iter().cloned())
            .collect();

        info!(
            "event=catalog_load module=catalog status=ok items={} tags={}",
            self.items.len(),
            self.known_tags.len()
        );
        self.notify();
    }

    /// Items in case-insensitive title order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Current vocabulary snapshot.
    pub fn known_tags(&self) -> &BTreeSet<String> {
        &self.known_tags
    }

    /// Finds the item whose stored url matches `url` up to one trailing
    /// slash, in either direction.
    pub fn find_by_url(&self, url: &str) -> Option<&Item> {
        let wanted = canonicalize_url(url.trim());
        self.items
            .iter()
            .find(|item| item.canonical_url() == wanted)
    }

    /// Creates or rewrites one item.
    ///
    /// Title, url and notes are trimmed; the url loses at most one
    /// trailing slash; tags are re-tokenized into lowercase
    /// whitespace-free tokens and folded against the vocabulary before
    /// both storage and vocabulary merge.
    ///
    /// # Errors
    /// - [`CatalogError::Validation`] when title or url trim to empty.
    /// - [`CatalogError::DuplicateUrl`] when a create collides with a
    ///   stored url.
    /// - [`CatalogError::NotFound`] when an update references an id
    ///   absent from the catalog or the store.
    /// - [`CatalogError::Store`] for other boundary failures.
    pub fn upsert(&mut self, item: Item) -> Result<ItemId, CatalogError> {
        // A tag carrying internal whitespace splits into separate tokens,
        // same as typed entry text would.
        let lowered: BTreeSet<String> = item
            .tags
            .iter()
            .flat_map(|tag| tag.split_whitespace())
            .map(str::to_lowercase)
            .collect();
        let normalized = Item {
            id: item.id,
            title: item.title.trim().to_string(),
            url: canonicalize_url(item.url.trim()).to_string(),
            notes: item.notes.trim().to_string(),
            tags: tags::fold_plurals(&lowered, &self.known_tags),
        };
        normalized.validate()?;
        let flat_tags = tags::to_flat(&normalized.tags);

        let id = match normalized.id {
            Some(id) => {
                let index = self
                    .position_of(id)
                    .ok_or(CatalogError::NotFound(id))?;
                self.store.update(
                    id,
                    &normalized.title,
                    &normalized.url,
                    &normalized.notes,
                    &flat_tags,
                )?;
                self.items[index] = normalized.clone();
                id
            }
            None => {
                if let Some(existing) = self.find_by_url(&normalized.url) {
                    return Err(CatalogError::DuplicateUrl(existing.url.clone()));
                }
                let id = self.store.insert(
                    &normalized.title,
                    &normalized.url,
                    &normalized.notes,
                    &flat_tags,
                )?;
                self.items.push(Item {
                    id: Some(id),
                    ..normalized.clone()
                });
                id
            }
        };

        self.sort_items();
        self.known_tags.extend(normalized.tags.iter().cloned());

        info!(
            "event=item_upsert module=catalog status=ok mode={} items={} tags={}",
            if item.id.is_some() { "update" } else { "insert" },
            self.items.len(),
            self.known_tags.len()
        );
        self.notify();
        Ok(id)
    }

    /// Deletes one item by id.
    ///
    /// The vocabulary is not shrunk; previously typed tags stay known.
    ///
    /// # Errors
    /// - [`CatalogError::NotFound`] when the id is absent from the
    ///   catalog or the store.
    /// - [`CatalogError::Store`] for other boundary failures.
    pub fn remove(&mut self, id: ItemId) -> Result<(), CatalogError> {
        let index = self
            .position_of(id)
            .ok_or(CatalogError::NotFound(id))?;
        self.store.delete(id)?;
        self.items.remove(index);

        info!(
            "event=item_remove module=catalog status=ok items={} tags={}",
            self.items.len(),
            self.known_tags.len()
        );
        self.notify();
        Ok(())
    }

    /// Folds typed tags and merges them into the vocabulary without
    /// attaching them to any item.
    ///
    /// Returns the folded set so an editor can echo the normalized
    /// spelling back into its entry field.
    pub fn remember_tags(&mut self, flat: &str) -> BTreeSet<String> {
        let folded = tags::fold_plurals(&tags::parse_flat(flat), &self.known_tags);
        let grew = folded
            .iter()
            .any(|tag| !self.known_tags.contains(tag));
        if grew {
            self.known_tags.extend(folded.iter().cloned());
            info!(
                "event=tags_remember module=catalog status=ok tags={}",
                self.known_tags.len()
            );
            self.notify();
        }
        folded
    }

    /// Snapshot for the export sink, pre-sorted case-insensitively by
    /// title, tags in flat form.
    pub fn export_snapshot(&self) -> Vec<ExportRecord> {
        self.items
            .iter()
            .map(|item| ExportRecord {
                title: item.title.clone(),
                url: item.url.clone(),
                notes: item.notes.clone(),
                tags: tags::to_flat(&item.tags),
            })
            .collect()
    }

    /// Registers a callback invoked after every successful mutation.
    ///
    /// Listeners must not mutate the catalog reentrantly; they re-pull
    /// state instead.
    pub fn subscribe(&mut self, listener: impl Fn() + 'static) {
        self.listeners.push(Box::new(listener));
    }

    fn notify(&self) {
        for listener in &self.listeners {
            listener();
        }
    }

    fn position_of(&self, id: ItemId) -> Option<usize> {
        self.items.iter().position(|item| item.id == Some(id))
    }

    fn sort_items(&mut self) {
        self.items
            .sort_by_key(|item| item.title.to_lowercase());
    }
}
