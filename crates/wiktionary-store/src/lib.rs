//! Consolidate wiktextract word records into dictionary entries and link
//! every inflected form to its lemma.
//!
//! Loading builds an [`EntryStore`] of one [`Entry`] per sense group. The
//! post-processing phases then mutate that store in a fixed order:
//!
//! 1. [`fold_reflexives`]: file reflexive-only verbs under their base verb.
//! 2. [`normalize_forms`]: reduce multi-token surface forms.
//! 3. [`synthesize_reciprocals`]: add stub entries for declared forms.
//!
//! [`resolve_lemmas`] answers "which lemma(s) does this entry come from" over
//! the finished store.
//!
//! # Example
//! ```no_run
//! use std::path::Path;
//! use wiktionary_store::{LoadMode, load_store, post_process, resolve_lemmas};
//!
//! # fn main() -> Result<(), wiktionary_store::StoreError> {
//! let mut store = load_store(Path::new("es-extract.jsonl"), LoadMode::Mmap)?;
//! post_process(&mut store);
//! for entry in store.get("corre") {
//!     println!("{:?}", resolve_lemmas(entry, &store));
//! }
//! # Ok(()) }
//! ```
//!
//! For a runnable demo, see `cargo run -p wiktionary-store --example stats -- <dump.jsonl>`.

mod builder;
mod error;
mod forms;
mod gloss;
mod loader;
mod reciprocal;
mod reflexive;
mod resolve;
mod store;

use tracing::info;

pub use builder::{build_entries, extract_form_of};
pub use error::StoreError;
pub use forms::normalize_forms;
pub use gloss::{GlossMismatch, clean_gloss, sense_text, tag_labels};
pub use loader::{LoadMode, build_store, load_store, parse_records, read_records};
pub use reciprocal::synthesize_reciprocals;
pub use reflexive::fold_reflexives;
pub use resolve::{LemmaSet, all_lemmas, resolve_lemmas};
pub use store::EntryStore;
pub use wiktionary_types::Entry;

/// Counts reported by [`post_process`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct PostProcessReport {
    pub reflexives_folded: usize,
    pub full_form_entries: usize,
    pub stubs_added: usize,
}

/// Run the post-processing phases in order.
pub fn post_process(store: &mut EntryStore) -> PostProcessReport {
    let reflexives_folded = fold_reflexives(store);
    let full_form_entries = normalize_forms(store);
    let stubs_added = synthesize_reciprocals(store);
    info!(
        "post-processing done: {} words, {} entries",
        store.word_count(),
        store.entry_count()
    );
    PostProcessReport {
        reflexives_folded,
        full_form_entries,
        stubs_added,
    }
}
