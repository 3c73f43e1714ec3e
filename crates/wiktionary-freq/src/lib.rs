//! Form → lemma lookup table driven by corpus frequencies.
//!
//! Counts are accumulated per `(form, pos, lemma)` from the *Corpus del
//! Español* list, the SRG form dictionary, and finally the lemma links of a
//! consolidated [`EntryStore`]. The table keeps, for each `(form, pos)`, the
//! lemma with the highest count; ties go to the lemma seen first.
//!
//! Besides real counts, two sentinels appear in the accumulator: `0` for a
//! link known without a count, `-1` for a lemma's own row added only so that
//! the row exists.
//!
//! # Example
//! ```rust
//! use wiktionary_freq::{CorpusRow, FormLemmaCounts};
//! use wiktionary_types::CoarsePos;
//!
//! let mut counts = FormLemmaCounts::new();
//! counts.record_primary([CorpusRow {
//!     form: "casas".into(),
//!     lemma: "casa".into(),
//!     pos: CoarsePos::Noun,
//!     frequency: 100,
//! }]);
//! let table = counts.select();
//! assert_eq!(table.get("casas", CoarsePos::Noun), Some("casa"));
//! ```

mod corpus;
mod error;

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use tracing::info;
use wiktionary_store::{EntryStore, resolve_lemmas};
use wiktionary_types::CoarsePos;

pub use corpus::{CorpusRow, cde_pos, decode_windows_1252, read_cde, read_srg_dir, srg_pos};
pub use error::CorpusError;

/// Count for a link observed without a corpus frequency.
pub const UNCOUNTED: i64 = 0;
/// Count for a lemma's own row when no corpus provided one.
pub const SELF_LINK: i64 = -1;

/// Nested `form → pos → [(lemma, count)]` accumulator. Lemmas keep
/// first-insertion order.
#[derive(Clone, Debug, Default)]
pub struct FormLemmaCounts {
    forms: HashMap<String, HashMap<CoarsePos, Vec<(String, i64)>>>,
}

impl FormLemmaCounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, form: &str, pos: CoarsePos, lemma: &str) -> Option<i64> {
        self.forms
            .get(form)?
            .get(&pos)?
            .iter()
            .find(|(l, _)| l == lemma)
            .map(|(_, count)| *count)
    }

    /// Set the count, replacing any earlier one.
    pub fn set(&mut self, form: &str, pos: CoarsePos, lemma: &str, count: i64) {
        let lemmas = self.lemmas_mut(form, pos);
        match lemmas.iter_mut().find(|(l, _)| l == lemma) {
            Some((_, existing)) => *existing = count,
            None => lemmas.push((lemma.to_string(), count)),
        }
    }

    /// Insert the count only when no count exists yet. Returns whether it was inserted.
    pub fn insert_if_absent(&mut self, form: &str, pos: CoarsePos, lemma: &str, count: i64) -> bool {
        let lemmas = self.lemmas_mut(form, pos);
        if lemmas.iter().any(|(l, _)| l == lemma) {
            return false;
        }
        lemmas.push((lemma.to_string(), count));
        true
    }

    /// Rows from the counted corpus; later rows replace earlier counts.
    pub fn record_primary(&mut self, rows: impl IntoIterator<Item = CorpusRow>) {
        for row in rows {
            self.set(&row.form, row.pos, &row.lemma, row.frequency);
        }
    }

    /// Rows from the uncounted corpus: never overwrite, and make sure each
    /// lemma has a row pointing at itself.
    pub fn record_secondary(&mut self, rows: impl IntoIterator<Item = CorpusRow>) {
        for row in rows {
            self.insert_if_absent(&row.form, row.pos, &row.lemma, row.frequency);
            self.insert_if_absent(&row.lemma, row.pos, &row.lemma, SELF_LINK);
        }
    }

    /// Add an uncounted row for every lemma the store resolves each entry to.
    /// Returns the number of rows added.
    pub fn record_store_links(&mut self, store: &EntryStore) -> usize {
        let mut added = 0usize;
        for entry in store.entries() {
            let form = entry.word.to_lowercase();
            for lemma in resolve_lemmas(entry, store).into_iter().flatten() {
                if self.insert_if_absent(&form, entry.f_pos, &lemma.to_lowercase(), UNCOUNTED) {
                    added += 1;
                }
            }
        }
        info!("added {added} lexicon links without corpus counts");
        added
    }

    /// Pick one lemma per `(form, pos)`.
    pub fn select(&self) -> LemmaTable {
        let rows = self
            .forms
            .iter()
            .map(|(form, by_pos)| {
                let choices = by_pos
                    .iter()
                    .filter_map(|(pos, lemmas)| best_lemma(lemmas).map(|l| (*pos, l.to_string())))
                    .collect::<BTreeMap<_, _>>();
                (form.clone(), choices)
            })
            .filter(|(_, choices)| !choices.is_empty())
            .collect();
        LemmaTable { rows }
    }

    fn lemmas_mut(&mut self, form: &str, pos: CoarsePos) -> &mut Vec<(String, i64)> {
        self.forms
            .entry(form.to_string())
            .or_default()
            .entry(pos)
            .or_default()
    }
}

fn best_lemma(lemmas: &[(String, i64)]) -> Option<&str> {
    let mut best: Option<&(String, i64)> = None;
    for candidate in lemmas {
        if best.is_none_or(|(_, count)| candidate.1 > *count) {
            best = Some(candidate);
        }
    }
    best.map(|(lemma, _)| lemma.as_str())
}

/// Final `form → pos → lemma` lookup table.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LemmaTable {
    rows: BTreeMap<String, BTreeMap<CoarsePos, String>>,
}

impl LemmaTable {
    pub fn get(&self, form: &str, pos: CoarsePos) -> Option<&str> {
        self.rows.get(form)?.get(&pos).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeMap<CoarsePos, String>)> + '_ {
        self.rows.iter().map(|(form, by_pos)| (form.as_str(), by_pos))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Ingest both corpora and the store's links, then select the table.
pub fn build_lemma_table(
    store: &EntryStore,
    cde_path: &Path,
    srg_dir: &Path,
) -> Result<LemmaTable, CorpusError> {
    let mut counts = FormLemmaCounts::new();
    counts.record_primary(read_cde(cde_path)?);
    counts.record_secondary(read_srg_dir(srg_dir)?);
    counts.record_store_links(store);
    let table = counts.select();
    info!("lemma table has {} forms", table.len());
    Ok(table)
}
