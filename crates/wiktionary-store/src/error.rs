use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("cannot open input {}: {source}", path.display())]
    MissingInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("line {line}: invalid record: {source}")]
    Json {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("line {line}: record is not valid utf-8")]
    Utf8 { line: usize },
    #[error("malformed gloss for {word:?}: {gloss:?}")]
    MalformedGloss { word: String, gloss: String },
}
