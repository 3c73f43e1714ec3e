//! Files reflexive-only verbs (`amarse`) under their non-reflexive headword.

use std::collections::HashMap;

use tracing::{debug, info};
use wiktionary_types::Entry;

use crate::store::EntryStore;

const REFLEXIVE_SUFFIX: &str = "rse";
const REFLEXIVE_LABEL: &str = "reflexive";

/// Fold qualifying reflexive verb entries into their base verb and rewrite
/// `form_of` links that named the reflexive word. Returns the number of
/// reflexive words folded.
pub fn fold_reflexives(store: &mut EntryStore) -> usize {
    let mut folded: HashMap<String, String> = HashMap::new();

    for word in store.words() {
        if !word.ends_with(REFLEXIVE_SUFFIX) {
            continue;
        }
        let Some(entries) = store.remove(&word) else {
            continue;
        };
        let (qualifying, rest): (Vec<Entry>, Vec<Entry>) =
            entries.into_iter().partition(is_reflexive_lemma);
        store.replace(&word, rest);
        if qualifying.is_empty() {
            continue;
        }

        let base = word[..word.len() - "se".len()].to_string();
        let processed: Vec<Entry> = qualifying
            .into_iter()
            .map(|entry| relabel(entry, &base))
            .collect();

        let mut existing = store.remove(&base).unwrap_or_default();
        existing.retain(|e| e.form_of.as_deref() != Some(word.as_str()));
        existing.extend(processed);
        store.replace(&base, existing);

        debug!("folded {word} into {base}");
        folded.insert(word, base);
    }

    for entry in store.entries_mut() {
        if let Some(base) = entry.form_of.as_ref().and_then(|f| folded.get(f)) {
            entry.form_of = Some(base.clone());
        }
    }

    info!("folded {} reflexive verbs", folded.len());
    folded.len()
}

fn is_reflexive_lemma(entry: &Entry) -> bool {
    entry.word.ends_with(REFLEXIVE_SUFFIX)
        && entry.pos == "verb"
        && entry.is_single_token()
        && entry.form_of.is_none()
}

fn relabel(mut entry: Entry, base: &str) -> Entry {
    for def in &mut entry.definitions {
        let mentions = [&def.definition, &def.label, &def.gloss]
            .into_iter()
            .flatten()
            .any(|text| text.contains(REFLEXIVE_LABEL));
        if !mentions {
            def.label = Some(match def.label.take() {
                Some(label) => format!("{REFLEXIVE_LABEL}, {label}"),
                None => REFLEXIVE_LABEL.to_string(),
            });
        }
    }
    if let Some(forms) = entry.forms.as_mut() {
        forms.push(entry.word.clone());
    }
    entry.word = base.to_string();
    entry
}
