use std::env;
use std::path::PathBuf;

use wiktionary_store::{LoadMode, load_store, post_process, resolve_lemmas};

fn dump_path() -> Option<PathBuf> {
    env::var("WIKTIONARY_DUMP").ok().map(PathBuf::from)
}

#[test]
fn processes_full_spanish_dump() {
    let Some(path) = dump_path() else {
        eprintln!("skipping: WIKTIONARY_DUMP not set");
        return;
    };
    let mut store = load_store(&path, LoadMode::Mmap).expect("load wiktextract dump");
    assert!(store.word_count() > 10_000, "dump too small");

    post_process(&mut store);
    for entry in store.get("corre") {
        if entry.form_of.is_some() && entry.pos == "verb" {
            assert!(resolve_lemmas(entry, &store).contains(&Some("correr".to_string())));
        }
    }
}
