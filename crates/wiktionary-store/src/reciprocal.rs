//! Synthesizes stub entries so every declared form is a headword pointing
//! back at its lemma.

use tracing::info;
use wiktionary_types::Entry;

use crate::resolve::resolve_lemmas;
use crate::store::EntryStore;

/// Append a `from_forms` stub under each declared form that has no entry
/// linking back to the declaring word. Stubs are visible to later checks in
/// the same pass, and a second pass adds nothing. Returns the number of stubs
/// added.
pub fn synthesize_reciprocals(store: &mut EntryStore) -> usize {
    let mut added = 0usize;
    for word in store.words() {
        let mut idx = 0;
        while idx < store.get(&word).len() {
            let entry = store.get(&word)[idx].clone();
            idx += 1;
            for form in entry.forms() {
                if form == &entry.word
                    || reachable_through_lemma(&entry, form, store)
                    || links_back(&entry, form, store)
                {
                    continue;
                }
                store.push(Entry::stub(form.as_str(), entry.pos.as_str(), entry.word.as_str()));
                added += 1;
            }
        }
    }
    info!("synthesized {added} reciprocal entries");
    added
}

/// A derived entry's form that its lemma already declares needs no stub of
/// its own.
fn reachable_through_lemma(entry: &Entry, form: &str, store: &EntryStore) -> bool {
    if entry.form_of.is_none() {
        return false;
    }
    resolve_lemmas(entry, store)
        .iter()
        .flatten()
        .any(|lemma| {
            store
                .get(lemma)
                .iter()
                .any(|e| e.pos == entry.pos && e.has_form(form))
        })
}

fn links_back(entry: &Entry, form: &str, store: &EntryStore) -> bool {
    let word = Some(entry.word.clone());
    store.get(form).iter().any(|candidate| {
        candidate.pos == entry.pos
            && (candidate.form_of.as_deref() == Some(entry.word.as_str())
                || candidate.has_form(&entry.word)
                || resolve_lemmas(candidate, store).contains(&word))
    })
}
