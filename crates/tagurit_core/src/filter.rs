//! Combined tag-subset and regex visibility filter.
//!
//! # Responsibility
//! - Hold the current filter criteria (required tag set, compiled
//!   case-insensitive pattern).
//! - Decide per-item visibility on request; nothing is cached per item.
//!
//! # Invariants
//! - A malformed pattern never clears the last successfully compiled one.
//! - `required_tags` are matched literally against stored item tags.

use crate::model::item::Item;
use log::info;
use regex::{Regex, RegexBuilder};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Filter criteria failure.
#[derive(Debug)]
pub enum FilterError {
    /// Pattern source failed to compile; the engine keeps its previous
    /// compiled pattern in effect.
    InvalidPattern {
        pattern: String,
        source: regex::Error,
    },
}

impl Display for FilterError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPattern { pattern, source } => {
                write!(f, "invalid filter pattern `{pattern}`: {source}")
            }
        }
    }
}

impl Error for FilterError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidPattern { source, .. } => Some(source),
        }
    }
}

/// Visibility predicate over the catalog's items.
///
/// Visibility is a derived, request-time computation; consumers re-run
/// it over the item list whenever the criteria or the catalog change.
#[derive(Default)]
pub struct FilterEngine {
    required_tags: BTreeSet<String>,
    pattern: Option<Regex>,
    listeners: Vec<Box<dyn Fn()>>,
}

impl FilterEngine {
    /// Creates an engine with no constraints; every item is visible.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the filter criteria.
    ///
    /// `required_tags` is stored verbatim. A non-empty `pattern_source`
    /// is compiled case-insensitively; on a malformed pattern the
    /// previous compiled pattern stays in effect while the tag set is
    /// still replaced, and the error is returned. An empty source clears
    /// the pattern.
    ///
    /// Listeners are notified in every case, since the criteria changed.
    ///
    /// # Errors
    /// - [`FilterError::InvalidPattern`] on a malformed pattern source.
    pub fn set_filter(
        &mut self,
        required_tags: BTreeSet<String>,
        pattern_source: &str,
    ) -> Result<(), FilterError> {
        self.required_tags = required_tags;

        let source = pattern_source.trim();
        let result = if source.is_empty() {
            self.pattern = None;
            Ok(())
        } else {
            match RegexBuilder::new(source).case_insensitive(true).build() {
                Ok(regex) => {
                    self.pattern = Some(regex);
                    Ok(())
                }
                Err(err) => Err(FilterError::InvalidPattern {
                    pattern: source.to_string(),
                    source: err,
                }),
            }
        };

        info!(
            "event=refilter module=filter status={} required_tags={} pattern_set={}",
            if result.is_ok() { "ok" } else { "error" },
            self.required_tags.len(),
            self.pattern.is_some()
        );
        self.notify();
        result
    }

    /// Required tag set currently in effect.
    pub fn required_tags(&self) -> &BTreeSet<String> {
        &self.required_tags
    }

    /// Source of the compiled pattern currently in effect, if any.
    pub fn pattern(&self) -> Option<&str> {
        self.pattern.as_ref().map(Regex::as_str)
    }

    /// Decides whether one item passes the current criteria.
    ///
    /// Tag clause first: a non-empty required set must be a subset of the
    /// item's tags. Pattern clause second: the pattern must find a match
    /// in title, url or notes. No constraints means visible.
    pub fn is_visible(&self, item: &Item) -> bool {
        if !self.required_tags.is_empty() && !self.required_tags.is_subset(&item.tags) {
            return false;
        }

        if let Some(regex) = &self.pattern {
            return regex.is_match(&item.title)
                || regex.is_match(&item.url)
                || regex.is_match(&item.notes);
        }

        true
    }

    /// Number of items passing the current criteria, for status lines.
    pub fn count_visible(&self, items: &[Item]) -> usize {
        items.iter().filter(|item| self.is_visible(item)).count()
    }

    /// Registers a callback invoked after every criteria change.
    ///
    /// Listeners must not mutate the engine reentrantly; they re-pull
    /// visibility per item.
    pub fn subscribe(&mut self, listener: impl Fn() + 'static) {
        self.listeners.push(Box::new(listener));
    }

    fn notify(&self) {
        for listener in &self.listeners {
            listener();
        }
    }
}
