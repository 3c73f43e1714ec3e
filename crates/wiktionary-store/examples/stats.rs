use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use wiktionary_store::{LoadMode, all_lemmas, load_store, post_process};

fn main() -> Result<()> {
    let dump = env::args()
        .nth(1)
        .map(PathBuf::from)
        .context("usage: cargo run -p wiktionary-store --example stats -- <dump.jsonl>")?;

    let mut store = load_store(&dump, LoadMode::Mmap)
        .with_context(|| format!("loading records from {}", dump.display()))?;
    let built_entries = store.entry_count();
    let report = post_process(&mut store);

    let form_of_entries = store.entries().filter(|e| e.form_of.is_some()).count();
    let stub_entries = store.entries().filter(|e| e.from_forms).count();

    println!("Dump: {}", dump.display());
    println!("Entries built    : {}", built_entries);
    println!("Words            : {}", store.word_count());
    println!("Entries          : {}", store.entry_count());
    println!("Form-of entries  : {}", form_of_entries);
    println!("Stub entries     : {}", stub_entries);
    println!("Reflexives folded: {}", report.reflexives_folded);
    println!("Full-form entries: {}", report.full_form_entries);
    println!("Distinct lemmas  : {}", all_lemmas(&store).len());

    Ok(())
}
