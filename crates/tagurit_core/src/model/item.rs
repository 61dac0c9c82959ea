//! Item domain model.
//!
//! # Responsibility
//! - Define the canonical bookmark record (title, url, notes, tag set).
//! - Provide url canonicalization used by duplicate detection.
//! - Validate save-time field requirements.
//!
//! # Invariants
//! - `id` is `None` while an item is being composed and becomes `Some`
//!   exactly once, when the sync boundary persists it.
//! - `tags` holds lowercase, whitespace-free tokens; set semantics make
//!   token order irrelevant and duplicates impossible.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier assigned by the sync boundary on first insert.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type ItemId = Uuid;

static URL_HOST_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.-]*://([^/?#]+)").expect("valid host regex"));

/// Save-time validation failure for item fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemValidationError {
    /// Title is empty after trimming.
    EmptyTitle,
    /// Url is empty after trimming.
    EmptyUrl,
}

impl Display for ItemValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "item title must not be empty"),
            Self::EmptyUrl => write!(f, "item url must not be empty"),
        }
    }
}

impl Error for ItemValidationError {}

/// One bookmark record.
///
/// Identity lives in `id`; every other field is rewritten in place on
/// subsequent saves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// `None` while composing; assigned by the sync boundary on insert.
    pub id: Option<ItemId>,
    /// Display string, required non-empty at save time.
    pub title: String,
    /// Stored canonicalized (at most one trailing `/` stripped).
    pub url: String,
    /// Free text, may be empty.
    pub notes: String,
    /// Lowercase whitespace-free tokens.
    pub tags: BTreeSet<String>,
}

impl Item {
    /// Creates a transient (not yet persisted) item.
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            url: url.into(),
            notes: String::new(),
            tags: BTreeSet::new(),
        }
    }

    /// Creates an item carrying an identity already assigned by the
    /// sync boundary. Used by bulk-load paths.
    pub fn with_id(id: ItemId, title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            ..Self::new(title, url)
        }
    }

    /// Returns the comparison form of this item's url.
    pub fn canonical_url(&self) -> &str {
        canonicalize_url(&self.url)
    }

    /// Checks save-time field requirements.
    ///
    /// # Errors
    /// - [`ItemValidationError::EmptyTitle`] when `title` trims to empty.
    /// - [`ItemValidationError::EmptyUrl`] when `url` trims to empty.
    pub fn validate(&self) -> Result<(), ItemValidationError> {
        if self.title.trim().is_empty() {
            return Err(ItemValidationError::EmptyTitle);
        }
        if self.url.trim().is_empty() {
            return Err(ItemValidationError::EmptyUrl);
        }
        Ok(())
    }
}

/// Strips exactly one trailing `/` so `http://x` and `http://x/` compare
/// equal in either direction.
pub fn canonicalize_url(url: &str) -> &str {
    url.strip_suffix('/').unwrap_or(url)
}

/// Derives a display title from a url's host portion.
///
/// Rules, matching the editor's pre-fill behavior:
/// - take the host between `scheme://` and the first `/`, `?` or `#`;
/// - drop a leading `www.`;
/// - drop a trailing `.com` or `.org`.
///
/// Returns `None` when the url carries no extractable host.
pub fn suggest_title(url: &str) -> Option<String> {
    let host = URL_HOST_RE
        .captures(url.trim())
        .and_then(|caps| caps.get(1))?
        .as_str();

    let mut title = host.strip_prefix("www.").unwrap_or(host);
    for suffix in [".com", ".org"] {
        if let Some(stripped) = title.strip_suffix(suffix) {
            title = stripped;
            break;
        }
    }

    if title.is_empty() {
        return None;
    }
    Some(title.to_string())
}
