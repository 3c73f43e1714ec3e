//! Line-delimited writers for the pipeline's outputs.
//!
//! Each file is written to a temporary sibling and persisted over the target
//! only once complete, so a failed run never leaves a truncated output under
//! the destination name.

use std::collections::BTreeSet;
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use wiktionary_freq::LemmaTable;
use wiktionary_store::EntryStore;

/// `[word, [entry, ...]]` per line, words in sorted order.
pub fn write_dictionary(path: &Path, store: &EntryStore) -> io::Result<()> {
    write_atomically(path, |out| {
        for (word, entries) in store.iter() {
            serde_json::to_writer(&mut *out, &(word, entries))?;
            out.write_all(b"\n")?;
        }
        Ok(())
    })
}

/// `[form, {pos: lemma}]` per line.
pub fn write_lemma_table(path: &Path, table: &LemmaTable) -> io::Result<()> {
    write_atomically(path, |out| {
        for (form, by_pos) in table.iter() {
            serde_json::to_writer(&mut *out, &(form, by_pos))?;
            out.write_all(b"\n")?;
        }
        Ok(())
    })
}

/// One lemma per line.
pub fn write_lemma_list(path: &Path, lemmas: &BTreeSet<String>) -> io::Result<()> {
    write_atomically(path, |out| {
        for lemma in lemmas {
            writeln!(out, "{lemma}")?;
        }
        Ok(())
    })
}

fn write_atomically<F>(path: &Path, fill: F) -> io::Result<()>
where
    F: FnOnce(&mut BufWriter<&NamedTempFile>) -> io::Result<()>,
{
    let parent_dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent_dir)?;

    let temp_file = NamedTempFile::new_in(parent_dir)?;
    {
        let mut writer = BufWriter::new(&temp_file);
        fill(&mut writer)?;
        writer.flush()?;
    }
    temp_file.persist(path).map_err(|e| e.error)?;
    Ok(())
}
