use std::fs;
use std::path::Path;

use tempfile::TempDir;

use dictionary_processor::{ConfigError, PipelineConfig, PipelineError, run};

const RECORDS: &str = r#"{"word":"correr","pos":"verb","forms":[{"form":"corriendo","tags":["gerund"]}],"senses":[{"glosses":["to run"]}]}
{"word":"corre","pos":"verb","senses":[{"form_of":[{"word":"correr"}],"glosses":["(informal) third person of correr"]}]}
{"word":"amarse","pos":"verb","senses":[{"glosses":["to love each other"]}]}
"#;

fn make_config(tmp: &Path) -> PipelineConfig {
    let input = tmp.join("records.jsonl");
    fs::write(&input, RECORDS).unwrap();

    let cde = tmp.join("cde.txt");
    fs::write(&cde, "header\n\n\n\n\n\n\nrank lemfreq lemma pos freq form x\n").unwrap();
    let srg = tmp.join("srg");
    fs::create_dir(&srg).unwrap();
    fs::write(srg.join("nouns"), "casas casa NCFP000\n").unwrap();

    let mut config = PipelineConfig::new(input, tmp.join("out").join("dictionary.jsonl"));
    config.cde_input = Some(cde);
    config.srg_input_dir = Some(srg);
    config
}

fn read_lines(path: &Path) -> Vec<serde_json::Value> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect()
}

#[test]
fn resolves_forms_without_corpus_coverage() {
    let tmp = TempDir::new().unwrap();
    let mut config = make_config(tmp.path());
    let table_path = tmp.path().join("lemmas.jsonl");
    let list_path = tmp.path().join("lemmas.txt");
    config.lemma_table = Some(table_path.clone());
    config.lemma_list = Some(list_path.clone());

    let outcome = run(&config).unwrap();
    assert_eq!(outcome.report.map(|r| r.reflexives_folded), Some(1));

    let table = read_lines(&table_path);
    let corre = table.iter().find(|row| row[0] == "corre").expect("corre row");
    assert_eq!(corre[1]["v"], "correr");
    let casas = table.iter().find(|row| row[0] == "casas").expect("casas row");
    assert_eq!(casas[1]["n"], "casa");

    let lemmas = fs::read_to_string(&list_path).unwrap();
    assert_eq!(lemmas, "amar\ncorrer\n");

    let dictionary = read_lines(&config.output);
    let words: Vec<&str> = dictionary.iter().map(|row| row[0].as_str().unwrap()).collect();
    assert_eq!(words, vec!["amar", "corre", "correr", "corriendo"]);
}

#[test]
fn skipping_post_processing_emits_store_as_built() {
    let tmp = TempDir::new().unwrap();
    let mut config = make_config(tmp.path());
    config.skip_post_processing = true;

    let outcome = run(&config).unwrap();
    assert!(outcome.report.is_none());
    assert_eq!(outcome.words, 3);

    let dictionary = read_lines(&config.output);
    assert!(dictionary.iter().any(|row| row[0] == "amarse"));
    assert!(!dictionary.iter().any(|row| row[0] == "corriendo"));
}

#[test]
fn conflicting_request_writes_nothing() {
    let tmp = TempDir::new().unwrap();
    let mut config = make_config(tmp.path());
    config.skip_post_processing = true;
    config.lemma_table = Some(tmp.path().join("lemmas.jsonl"));

    let err = run(&config).unwrap_err();
    assert!(matches!(err, PipelineError::Config(ConfigError::Conflict(_))));
    assert!(!config.output.exists());
}

#[test]
fn missing_input_writes_nothing() {
    let tmp = TempDir::new().unwrap();
    let config = PipelineConfig::new(tmp.path().join("absent.jsonl"), tmp.path().join("out.jsonl"));

    let err = run(&config).unwrap_err();
    assert!(matches!(err, PipelineError::Config(ConfigError::MissingInput(_))));
    assert!(!config.output.exists());
}

#[test]
fn malformed_gloss_aborts_before_output() {
    let tmp = TempDir::new().unwrap();
    let input = tmp.path().join("records.jsonl");
    fs::write(
        &input,
        r#"{"word":"roto","pos":"adj","senses":[{"raw_glosses":["broken\nline"]}]}"#,
    )
    .unwrap();
    let config = PipelineConfig::new(input, tmp.path().join("out.jsonl"));

    let err = run(&config).unwrap_err();
    assert!(matches!(
        err,
        PipelineError::Store(wiktionary_store::StoreError::MalformedGloss { .. })
    ));
    assert!(!config.output.exists());
}
