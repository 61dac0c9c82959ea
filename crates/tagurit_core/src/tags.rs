//! Tag tokenization, flat serialization and singular/plural folding.
//!
//! # Responsibility
//! - Convert between tag sets and the flat space-delimited string form.
//! - Fold newly typed tags against the known vocabulary so singular and
//!   plural near-duplicates collapse onto the existing spelling.
//!
//! # Invariants
//! - Parsed tokens are lowercase and whitespace-free.
//! - Folding is a single pass; a folded token is not re-examined against
//!   the updated set within the same call.

use std::collections::BTreeSet;

/// Parses the flat space-delimited tag form into a normalized set.
///
/// Tokens are lowercased; duplicates collapse through set semantics.
pub fn parse_flat(flat: &str) -> BTreeSet<String> {
    flat.split_whitespace()
        .map(|token| token.to_lowercase())
        .collect()
}

/// Serializes a tag set to the flat form used across the sync boundary.
///
/// The result carries one leading and one trailing space so a raw
/// substring probe for `" tag "` matches whole tokens only (`tag` never
/// collides with `tagging`).
pub fn to_flat(tags: &BTreeSet<String>) -> String {
    let mut flat = String::from(" ");
    for tag in tags {
        flat.push_str(tag);
        flat.push(' ');
    }
    flat
}

/// Folds tags not yet in `known` onto an existing singular/plural sibling.
///
/// For each token `t` of `input` absent from `known`:
/// - `t` ending in `s` with `t` minus the `s` known becomes the singular;
/// - otherwise `t` with an `s` appended being known becomes the plural;
/// - otherwise `t` stays, a genuinely new tag.
///
/// The singular-drop rule is tested first, so at most one transformation
/// applies per token. The caller decides whether to merge the result into
/// the vocabulary.
pub fn fold_plurals(input: &BTreeSet<String>, known: &BTreeSet<String>) -> BTreeSet<String> {
    let mut folded = BTreeSet::new();

    for tag in input {
        if known.contains(tag) {
            folded.insert(tag.clone());
            continue;
        }

        if let Some(singular) = tag.strip_suffix('s') {
            if known.contains(singular) {
                folded.insert(singular.to_string());
                continue;
            }
        }

        let plural = format!("{tag}s");
        if known.contains(&plural) {
            folded.insert(plural);
            continue;
        }

        folded.insert(tag.clone());
    }

    folded
}

#[cfg(test)]
mod tests {
    use super::{parse_flat, to_flat};
    use std::collections::BTreeSet;

    #[test]
    fn parse_flat_lowercases_and_deduplicates() {
        let parsed = parse_flat("  News FAVE news ");
        let expected: BTreeSet<String> = ["news", "fave"].iter().map(|s| s.to_string()).collect();
        assert_eq!(parsed, expected);
    }

    #[test]
    fn to_flat_wraps_tokens_in_single_spaces() {
        let tags: BTreeSet<String> = ["b", "a"].iter().map(|s| s.to_string()).collect();
        assert_eq!(to_flat(&tags), " a b ");
    }

    #[test]
    fn flat_forms_round_trip() {
        let tags: BTreeSet<String> = ["news", "fave"].iter().map(|s| s.to_string()).collect();
        assert_eq!(parse_flat(&to_flat(&tags)), tags);
    }
}
