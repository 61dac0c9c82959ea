//! Core domain logic for TagUrIt, the bookmark tagger.
//! This crate is the single source of truth for catalog and filter
//! invariants; editors and export sinks stay thin consumers.

pub mod catalog;
pub mod filter;
pub mod logging;
pub mod model;
pub mod store;
pub mod tags;

pub use catalog::{Catalog, CatalogError, ExportRecord};
pub use filter::{FilterEngine, FilterError};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::item::{canonicalize_url, suggest_title, Item, ItemId, ItemValidationError};
pub use store::{MemoryStore, StoreError, StoreResult, SyncStore};
pub use tags::{fold_plurals, parse_flat, to_flat};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
