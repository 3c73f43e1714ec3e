use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("cannot open corpus {}: {source}", path.display())]
    MissingInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read corpus {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{}:{line}: expected {expected} columns, found {found}", path.display())]
    MalformedLine {
        path: PathBuf,
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("{}:{line}: invalid frequency {value:?}", path.display())]
    InvalidCount {
        path: PathBuf,
        line: usize,
        value: String,
    },
}
