use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use tracing::{Level, info};
use tracing_subscriber::EnvFilter;

use dictionary_processor::{Cli, PipelineConfig, run};

fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = PipelineConfig::from(Cli::parse());
    info!("reading records from {}", config.input.display());
    info!("writing dictionary to {}", config.output.display());
    if config.skip_post_processing {
        info!("post-processing disabled");
    }
    if let Some(path) = &config.lemma_table {
        info!("lemma table requested at {}", path.display());
    }
    if let Some(path) = &config.lemma_list {
        info!("lemma list requested at {}", path.display());
    }

    let start = Instant::now();
    let outcome = run(&config)
        .with_context(|| format!("processing {}", config.input.display()))?;
    info!(
        "done in {} ms: {} words, {} entries",
        start.elapsed().as_millis(),
        outcome.words,
        outcome.entries
    );
    if let Some(rows) = outcome.lemma_table_rows {
        info!("lemma table: {rows} forms");
    }
    if let Some(len) = outcome.lemma_list_len {
        info!("lemma list: {len} lemmas");
    }
    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let max_level = env_filter
        .max_level_hint()
        .and_then(|hint| hint.into_level())
        .unwrap_or(Level::INFO);
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_level(true)
        .with_max_level(max_level)
        .init();
}
