//! Follows `form_of` chains back to the lemmas an entry derives from.
//!
//! The form-of graph is never materialized: nodes are words in the
//! [`EntryStore`], edges are `form_of` references, and a word can hold several
//! entries (several outgoing edges). Real data contains cycles and dangling
//! targets, so traversal carries an explicit visited set.

use std::collections::{BTreeSet, HashSet};

use wiktionary_types::Entry;

use crate::store::EntryStore;

/// Lemma words reached from an entry. `None` marks a chain whose lemma is
/// unknown because a `form_of` target is missing from the store.
pub type LemmaSet = BTreeSet<Option<String>>;

/// Resolve the lemmas `entry` ultimately derives from.
///
/// A base entry resolves to itself. A form never resolves to itself; if
/// nothing else remains the result is `{None}`. The chain must stay within the
/// entry's part of speech.
pub fn resolve_lemmas(entry: &Entry, store: &EntryStore) -> LemmaSet {
    let mut visited = HashSet::new();
    resolve_from(entry, store, &mut visited, &entry.pos, true)
}

fn resolve_from<'a>(
    entry: &'a Entry,
    store: &'a EntryStore,
    visited: &mut HashSet<&'a str>,
    target_pos: &str,
    is_root: bool,
) -> LemmaSet {
    let form_of = entry.form_of.as_deref();
    if let Some(target) = form_of
        && visited.contains(target)
    {
        return LemmaSet::from([Some(target.to_string())]);
    }
    if entry.pos != target_pos {
        return LemmaSet::new();
    }
    let Some(target) = form_of else {
        return LemmaSet::from([Some(entry.word.clone())]);
    };
    if !store.contains(target) {
        return LemmaSet::from([None]);
    }

    visited.insert(target);
    let mut lemmas = LemmaSet::new();
    for next in store.get(target) {
        lemmas.extend(resolve_from(next, store, visited, target_pos, false));
    }
    if is_root {
        lemmas.remove(&Some(entry.word.clone()));
    }
    if lemmas.is_empty() {
        lemmas.insert(None);
    }
    lemmas
}

/// Union of the known lemmas of every entry in the store.
pub fn all_lemmas(store: &EntryStore) -> BTreeSet<String> {
    store
        .entries()
        .flat_map(|entry| resolve_lemmas(entry, store))
        .flatten()
        .collect()
}
