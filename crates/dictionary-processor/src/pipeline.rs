use std::collections::BTreeSet;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

use thiserror::Error;
use tracing::info;
use wiktionary_freq::{CorpusError, LemmaTable, build_lemma_table};
use wiktionary_store::{EntryStore, PostProcessReport, StoreError, all_lemmas, load_store, post_process};

use crate::config::{ConfigError, PipelineConfig};
use crate::output;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Corpus(#[from] CorpusError),
    #[error("failed to write {}: {source}", path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Everything the pipeline computes, before anything is written.
#[derive(Debug)]
pub struct Products {
    pub store: EntryStore,
    pub report: Option<PostProcessReport>,
    pub lemma_table: Option<LemmaTable>,
    pub lemma_list: Option<BTreeSet<String>>,
}

#[derive(Clone, Debug, Default)]
pub struct PipelineOutcome {
    pub words: usize,
    pub entries: usize,
    pub report: Option<PostProcessReport>,
    pub lemma_table_rows: Option<usize>,
    pub lemma_list_len: Option<usize>,
}

/// Validate, load, process and write every requested output.
pub fn run(config: &PipelineConfig) -> Result<PipelineOutcome, PipelineError> {
    config.validate()?;

    let start = Instant::now();
    let store = load_store(&config.input, config.load_mode)?;
    info!("store built in {} ms", start.elapsed().as_millis());

    let products = process(store, config)?;

    let write_start = Instant::now();
    write_output(&config.output, |p| output::write_dictionary(p, &products.store))?;
    if let (Some(path), Some(table)) = (&config.lemma_table, &products.lemma_table) {
        write_output(path, |p| output::write_lemma_table(p, table))?;
    }
    if let (Some(path), Some(lemmas)) = (&config.lemma_list, &products.lemma_list) {
        write_output(path, |p| output::write_lemma_list(p, lemmas))?;
    }
    info!("outputs written in {} ms", write_start.elapsed().as_millis());

    Ok(PipelineOutcome {
        words: products.store.word_count(),
        entries: products.store.entry_count(),
        report: products.report,
        lemma_table_rows: products.lemma_table.as_ref().map(LemmaTable::len),
        lemma_list_len: products.lemma_list.as_ref().map(BTreeSet::len),
    })
}

/// Run the post-processing phases and build the optional lookup outputs.
pub fn process(mut store: EntryStore, config: &PipelineConfig) -> Result<Products, PipelineError> {
    if config.skip_post_processing {
        info!("post-processing skipped");
        return Ok(Products {
            store,
            report: None,
            lemma_table: None,
            lemma_list: None,
        });
    }

    let start = Instant::now();
    let report = post_process(&mut store);
    info!(
        "post-processing finished in {} ms ({} reflexives folded, {} stubs added)",
        start.elapsed().as_millis(),
        report.reflexives_folded,
        report.stubs_added
    );

    let lemma_list = config.builds_lemma_list().then(|| all_lemmas(&store));
    if let Some(lemmas) = &lemma_list {
        info!("{} distinct lemmas", lemmas.len());
    }

    let lemma_table = match (&config.lemma_table, &config.cde_input, &config.srg_input_dir) {
        (Some(_), Some(cde), Some(srg)) => Some(build_lemma_table(&store, cde, srg)?),
        (Some(_), _, _) => {
            return Err(ConfigError::Conflict(
                "a lemma table needs both --cde-input and --srg-input-dir".into(),
            )
            .into());
        }
        _ => None,
    };

    Ok(Products {
        store,
        report: Some(report),
        lemma_table,
        lemma_list,
    })
}

fn write_output<F>(path: &Path, write: F) -> Result<(), PipelineError>
where
    F: FnOnce(&Path) -> io::Result<()>,
{
    write(path).map_err(|source| PipelineError::Output {
        path: path.to_path_buf(),
        source,
    })?;
    info!("wrote {}", path.display());
    Ok(())
}
