use std::path::{Path, PathBuf};

use clap::Parser;
use thiserror::Error;
use wiktionary_store::LoadMode;

#[derive(Debug, Parser)]
#[command(name = "process-dictionary")]
#[command(about = "Consolidate a wiktextract dump into dictionary entries and lemma tables")]
pub struct Cli {
    /// Line-delimited wiktextract dump.
    #[arg(long, env = "DICT_INPUT")]
    pub input: PathBuf,
    /// Dictionary output, one `[word, entries]` array per line.
    #[arg(long, env = "DICT_OUTPUT")]
    pub output: PathBuf,
    /// Emit the store as built, without reflexive folding, form
    /// normalization, stub synthesis or lemma resolution.
    #[arg(long, env = "DICT_NO_POST_PROCESS")]
    pub no_post_process: bool,
    /// Write the form → lemma table here.
    #[arg(long, env = "DICT_LEMMA_TABLE")]
    pub lemma_table: Option<PathBuf>,
    /// Write the list of resolved lemmas here.
    #[arg(long, env = "DICT_LEMMA_LIST")]
    pub lemma_list: Option<PathBuf>,
    /// Corpus del Español frequency list.
    #[arg(long, env = "DICT_CDE_PATH")]
    pub cde_input: Option<PathBuf>,
    /// Directory of SRG form dictionary files.
    #[arg(long, env = "DICT_SRG_DIR")]
    pub srg_input_dir: Option<PathBuf>,
    /// How to read the dump: `mmap` or `owned`.
    #[arg(long, env = "DICT_LOAD_MODE", default_value = "mmap", value_parser = parse_load_mode)]
    pub load_mode: LoadMode,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("conflicting options: {0}")]
    Conflict(String),
    #[error("input not found: {}", .0.display())]
    MissingInput(PathBuf),
}

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub skip_post_processing: bool,
    pub lemma_table: Option<PathBuf>,
    pub lemma_list: Option<PathBuf>,
    pub cde_input: Option<PathBuf>,
    pub srg_input_dir: Option<PathBuf>,
    pub load_mode: LoadMode,
}

impl PipelineConfig {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            skip_post_processing: false,
            lemma_table: None,
            lemma_list: None,
            cde_input: None,
            srg_input_dir: None,
            load_mode: LoadMode::Mmap,
        }
    }

    pub fn builds_lemma_table(&self) -> bool {
        self.lemma_table.is_some()
    }

    pub fn builds_lemma_list(&self) -> bool {
        self.lemma_list.is_some()
    }

    /// Reject conflicting options and unreadable inputs before any work starts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.skip_post_processing && self.builds_lemma_table() {
            return Err(ConfigError::Conflict(
                "a lemma table needs post-processing".into(),
            ));
        }
        if self.skip_post_processing && self.builds_lemma_list() {
            return Err(ConfigError::Conflict(
                "a lemma list needs post-processing".into(),
            ));
        }
        if self.builds_lemma_table() && (self.cde_input.is_none() || self.srg_input_dir.is_none())
        {
            return Err(ConfigError::Conflict(
                "a lemma table needs both --cde-input and --srg-input-dir".into(),
            ));
        }

        require_exists(&self.input)?;
        if self.builds_lemma_table() {
            for path in [&self.cde_input, &self.srg_input_dir].into_iter().flatten() {
                require_exists(path)?;
            }
        }
        Ok(())
    }
}

impl From<Cli> for PipelineConfig {
    fn from(cli: Cli) -> Self {
        Self {
            input: cli.input,
            output: cli.output,
            skip_post_processing: cli.no_post_process,
            lemma_table: cli.lemma_table,
            lemma_list: cli.lemma_list,
            cde_input: cli.cde_input,
            srg_input_dir: cli.srg_input_dir,
            load_mode: cli.load_mode,
        }
    }
}

fn require_exists(path: &Path) -> Result<(), ConfigError> {
    if path.exists() {
        Ok(())
    } else {
        Err(ConfigError::MissingInput(path.to_path_buf()))
    }
}

fn parse_load_mode(raw: &str) -> Result<LoadMode, String> {
    match raw.to_ascii_lowercase().as_str() {
        "mmap" => Ok(LoadMode::Mmap),
        "owned" => Ok(LoadMode::Owned),
        other => Err(format!("unknown load mode {other:?} (expected mmap or owned)")),
    }
}
