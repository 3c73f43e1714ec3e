//! Reads the line-delimited wiktextract dump into an [`EntryStore`].

use std::fs::File;
use std::io::Read;
use std::path::Path;

use memmap2::Mmap;
use tracing::{debug, info};
use wiktionary_types::RawRecord;

use crate::builder::build_entries;
use crate::error::StoreError;
use crate::store::EntryStore;

/// Strategy for loading the dump.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum LoadMode {
    /// Memory-map the dump (fast, zero-copy).
    #[default]
    Mmap,
    /// Read the dump into an owned buffer (portable fallback).
    Owned,
}

enum Buffer {
    Mmap(Mmap),
    Owned(Vec<u8>),
}

impl Buffer {
    fn as_slice(&self) -> &[u8] {
        match self {
            Buffer::Mmap(m) => m.as_ref(),
            Buffer::Owned(v) => v.as_slice(),
        }
    }
}

/// Parse every record in the dump at `path`.
pub fn read_records(path: &Path, mode: LoadMode) -> Result<Vec<RawRecord>, StoreError> {
    let buffer = load_file(path, mode)?;
    parse_records(buffer.as_slice())
}

/// Parse records from an in-memory JSONL buffer. Blank lines are skipped.
pub fn parse_records(bytes: &[u8]) -> Result<Vec<RawRecord>, StoreError> {
    let mut records = Vec::new();
    for (lineno, raw_line) in bytes.split(|b| *b == b'\n').enumerate() {
        let line = strip_cr(raw_line);
        if line.iter().all(u8::is_ascii_whitespace) {
            continue;
        }
        let text = std::str::from_utf8(line).map_err(|_| StoreError::Utf8 { line: lineno + 1 })?;
        let record = serde_json::from_str(text).map_err(|source| StoreError::Json {
            line: lineno + 1,
            source,
        })?;
        records.push(record);
    }
    Ok(records)
}

/// Build an entry store from the dump at `path`.
pub fn load_store(path: &Path, mode: LoadMode) -> Result<EntryStore, StoreError> {
    let records = read_records(path, mode)?;
    info!("read {} records from {}", records.len(), path.display());
    build_store(records)
}

/// Build entries for every record and collect them by word, without
/// deduplication.
pub fn build_store(records: impl IntoIterator<Item = RawRecord>) -> Result<EntryStore, StoreError> {
    let mut store = EntryStore::new();
    for record in records {
        let word = record.word.clone();
        let entries = build_entries(record)?;
        debug!("{word}: {} entries", entries.len());
        store.extend(entries);
    }
    info!(
        "built {} entries across {} words",
        store.entry_count(),
        store.word_count()
    );
    Ok(store)
}

fn load_file(path: &Path, mode: LoadMode) -> Result<Buffer, StoreError> {
    let mut file = File::open(path).map_err(|source| StoreError::MissingInput {
        path: path.to_path_buf(),
        source,
    })?;
    let io_err = |source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    };
    match mode {
        LoadMode::Mmap => unsafe { Mmap::map(&file) }.map(Buffer::Mmap).map_err(io_err),
        LoadMode::Owned => {
            let mut buf = Vec::new();
            file.read_to_end(&mut buf).map_err(io_err)?;
            Ok(Buffer::Owned(buf))
        }
    }
}

fn strip_cr(line: &[u8]) -> &[u8] {
    line.strip_suffix(b"\r").unwrap_or(line)
}
