//! Readers for the two external frequency corpora.
//!
//! Both are Windows-1252 text. The *Corpus del Español* list is a single
//! file with an 8-line header and seven columns per row; the SRG form
//! dictionary is a directory of `form lemma tag` files without counts.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use wiktionary_types::CoarsePos;

use crate::error::CorpusError;

const CDE_HEADER_LINES: usize = 8;
const CDE_COLUMNS: usize = 7;
const SRG_COLUMNS: usize = 3;
/// SRG file that duplicates the verb list with a different tokenization.
const SRG_SKIPPED_FILE: &str = "verbs-nogros";

/// One `(form, lemma, pos, frequency)` observation, case-folded.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CorpusRow {
    pub form: String,
    pub lemma: String,
    pub pos: CoarsePos,
    pub frequency: i64,
}

/// Part-of-speech codes of the *Corpus del Español* word list.
pub fn cde_pos(code: &str) -> CoarsePos {
    match code {
        "j" => CoarsePos::Adjective,
        "m" | "n" | "o" => CoarsePos::Noun,
        "r" => CoarsePos::Adverb,
        "v" => CoarsePos::Verb,
        _ => CoarsePos::Other,
    }
}

/// Leading character of an SRG (EAGLES) tag. `Z` numerals and `W` dates are
/// treated as nouns.
pub fn srg_pos(tag: &str) -> CoarsePos {
    match tag.chars().next() {
        Some('A') => CoarsePos::Adjective,
        Some('N' | 'Z' | 'W') => CoarsePos::Noun,
        Some('R') => CoarsePos::Adverb,
        Some('V') => CoarsePos::Verb,
        _ => CoarsePos::Other,
    }
}

/// Read the *Corpus del Español* list at `path`.
pub fn read_cde(path: &Path) -> Result<Vec<CorpusRow>, CorpusError> {
    let text = read_windows_1252(path)?;
    let mut rows = Vec::new();
    for (lineno, line) in text.lines().enumerate().skip(CDE_HEADER_LINES) {
        if line.trim().is_empty() {
            continue;
        }
        let cols = columns(path, lineno, line, CDE_COLUMNS)?;
        // rank lemmaFreq lemma pos formFreq form extra
        let frequency = cols[4]
            .parse::<i64>()
            .map_err(|_| CorpusError::InvalidCount {
                path: path.to_path_buf(),
                line: lineno + 1,
                value: cols[4].to_string(),
            })?;
        rows.push(CorpusRow {
            form: cols[5].to_lowercase(),
            lemma: cols[2].to_lowercase(),
            pos: cde_pos(cols[3]),
            frequency,
        });
    }
    info!("read {} rows from {}", rows.len(), path.display());
    Ok(rows)
}

/// Read every SRG file in `dir`, in file-name order. Rows carry frequency 0.
pub fn read_srg_dir(dir: &Path) -> Result<Vec<CorpusRow>, CorpusError> {
    let listing = fs::read_dir(dir).map_err(|source| CorpusError::MissingInput {
        path: dir.to_path_buf(),
        source,
    })?;
    let mut files: Vec<PathBuf> = Vec::new();
    for item in listing {
        let item = item.map_err(|source| CorpusError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        if item.file_name() != SRG_SKIPPED_FILE {
            files.push(item.path());
        }
    }
    files.sort();

    let mut rows = Vec::new();
    for file in &files {
        let before = rows.len();
        read_srg_file(file, &mut rows)?;
        debug!("{}: {} rows", file.display(), rows.len() - before);
    }
    info!(
        "read {} rows from {} files in {}",
        rows.len(),
        files.len(),
        dir.display()
    );
    Ok(rows)
}

fn read_srg_file(path: &Path, rows: &mut Vec<CorpusRow>) -> Result<(), CorpusError> {
    let text = read_windows_1252(path)?;
    for (lineno, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let cols = columns(path, lineno, line, SRG_COLUMNS)?;
        let lemma = cols[1].to_lowercase();
        // Contracted forms list each component lemma joined by `+`.
        let lemma = match lemma.split_once('+') {
            Some((first, _)) => first.to_string(),
            None => lemma,
        };
        rows.push(CorpusRow {
            form: cols[0].to_lowercase(),
            lemma,
            pos: srg_pos(cols[2]),
            frequency: 0,
        });
    }
    Ok(())
}

fn columns<'a>(
    path: &Path,
    lineno: usize,
    line: &'a str,
    expected: usize,
) -> Result<Vec<&'a str>, CorpusError> {
    let cols: Vec<&str> = line.split_whitespace().collect();
    if cols.len() != expected {
        return Err(CorpusError::MalformedLine {
            path: path.to_path_buf(),
            line: lineno + 1,
            expected,
            found: cols.len(),
        });
    }
    Ok(cols)
}

fn read_windows_1252(path: &Path) -> Result<String, CorpusError> {
    let bytes = fs::read(path).map_err(|source| CorpusError::MissingInput {
        path: path.to_path_buf(),
        source,
    })?;
    let undefined = undefined_cp1252_bytes(&bytes);
    if undefined > 0 {
        warn!(
            "{}: {undefined} bytes undefined in windows-1252, kept as C1 controls",
            path.display()
        );
    }
    Ok(decode_windows_1252(&bytes))
}

/// Bytes with no windows-1252 assignment.
const CP1252_UNDEFINED: [u8; 5] = [0x81, 0x8D, 0x8F, 0x90, 0x9D];

fn undefined_cp1252_bytes(bytes: &[u8]) -> usize {
    bytes.iter().filter(|b| CP1252_UNDEFINED.contains(b)).count()
}

/// Code points for bytes 0x80..=0x9F; the rest of the range matches Latin-1.
const CP1252_HIGH: [char; 32] = [
    '\u{20AC}', '\u{0081}', '\u{201A}', '\u{0192}', '\u{201E}', '\u{2026}', '\u{2020}', '\u{2021}',
    '\u{02C6}', '\u{2030}', '\u{0160}', '\u{2039}', '\u{0152}', '\u{008D}', '\u{017D}', '\u{008F}',
    '\u{0090}', '\u{2018}', '\u{2019}', '\u{201C}', '\u{201D}', '\u{2022}', '\u{2013}', '\u{2014}',
    '\u{02DC}', '\u{2122}', '\u{0161}', '\u{203A}', '\u{0153}', '\u{009D}', '\u{017E}', '\u{0178}',
];

pub fn decode_windows_1252(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|&b| match b {
            0x80..=0x9F => CP1252_HIGH[(b - 0x80) as usize],
            _ => char::from(b),
        })
        .collect()
}
