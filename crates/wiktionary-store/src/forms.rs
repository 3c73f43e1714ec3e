//! Reduces multi-token surface forms (`"de color azul"`) to their last token.

use std::collections::BTreeSet;

use tracing::info;

use crate::store::EntryStore;

/// Trailing tokens that only appear in malformed multi-token forms.
const MALFORMED_LAST_TOKENS: [&str; 2] = ["gender-neutral", "meaning"];

/// Normalize the `forms` of every entry. Single-token words keep only the
/// last token of each form, with multi-token originals copied to
/// `full_forms`; multi-token words are only deduplicated. Returns the number
/// of entries that gained `full_forms`.
pub fn normalize_forms(store: &mut EntryStore) -> usize {
    let mut with_full_forms = 0usize;
    for entry in store.entries_mut() {
        let Some(forms) = entry.forms.take() else {
            continue;
        };
        if forms.is_empty() {
            continue;
        }
        if !entry.is_single_token() {
            entry.forms = Some(sorted_unique(forms));
            continue;
        }

        let reduced: BTreeSet<String> = forms
            .iter()
            .filter_map(|form| form.split_whitespace().next_back())
            .filter(|last| !MALFORMED_LAST_TOKENS.contains(last))
            .map(str::to_string)
            .collect();
        if forms.iter().any(|form| form.split_whitespace().count() > 1) {
            entry.full_forms = Some(sorted_unique(forms));
            with_full_forms += 1;
        }
        entry.forms = Some(reduced.into_iter().collect());
    }
    info!("{with_full_forms} entries kept multi-token full forms");
    with_full_forms
}

fn sorted_unique(forms: Vec<String>) -> Vec<String> {
    forms
        .into_iter()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
