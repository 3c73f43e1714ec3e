use std::fs;
use std::path::Path;

use tempfile::TempDir;
use wiktionary_freq::{CorpusError, build_lemma_table, read_cde, read_srg_dir};
use wiktionary_store::EntryStore;
use wiktionary_types::{CoarsePos, Entry};

const CDE_HEADER: &[u8] = b"Corpus del Espa\xf1ol\nword list\n\n\n\n\n\nrank lemfreq lemma pos freq form x\n";

fn write_cde(dir: &Path, body: &[u8]) -> std::path::PathBuf {
    let path = dir.join("cde.txt");
    let mut bytes = CDE_HEADER.to_vec();
    bytes.extend_from_slice(body);
    fs::write(&path, bytes).unwrap();
    path
}

fn write_srg(dir: &Path, files: &[(&str, &str)]) -> std::path::PathBuf {
    let srg = dir.join("srg");
    fs::create_dir(&srg).unwrap();
    for (name, body) in files {
        fs::write(srg.join(name), body).unwrap();
    }
    srg
}

#[test]
fn reads_cde_rows_after_header() {
    let tmp = TempDir::new().unwrap();
    let path = write_cde(
        tmp.path(),
        b"1 900 casa n 100 Casas x\n2 800 a\xf1o n 75 a\xf1os x\n\n",
    );
    let rows = read_cde(&path).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].form, "casas");
    assert_eq!(rows[0].frequency, 100);
    assert_eq!(rows[1].lemma, "año");
    assert_eq!(rows[1].pos, CoarsePos::Noun);
}

#[test]
fn malformed_cde_line_is_fatal() {
    let tmp = TempDir::new().unwrap();
    let path = write_cde(tmp.path(), b"1 900 casa n 100\n");
    let err = read_cde(&path).unwrap_err();
    assert!(matches!(
        err,
        CorpusError::MalformedLine {
            line: 9,
            expected: 7,
            found: 5,
            ..
        }
    ));
}

#[test]
fn reads_srg_dir_skipping_nogros_file() {
    let tmp = TempDir::new().unwrap();
    let dir = write_srg(
        tmp.path(),
        &[
            ("nouns", "casas casa NCFP000\n"),
            ("verbs-nogros", "not a valid line at all\n"),
            ("contractions", "del de+el SPCMS\n"),
        ],
    );
    let rows = read_srg_dir(&dir).unwrap();
    assert_eq!(rows.len(), 2);
    // sorted by file name: contractions, nouns
    assert_eq!(rows[0].lemma, "de");
    assert_eq!(rows[0].pos, CoarsePos::Other);
    assert_eq!(rows[1].form, "casas");
    assert_eq!(rows[1].pos, CoarsePos::Noun);
}

#[test]
fn missing_corpus_is_reported() {
    let err = read_srg_dir(Path::new("/nonexistent/srg")).unwrap_err();
    assert!(matches!(err, CorpusError::MissingInput { .. }));
}

#[test]
fn builds_table_from_corpora_and_store() {
    let tmp = TempDir::new().unwrap();
    let cde = write_cde(tmp.path(), b"1 900 ir v 40 fue x\n");
    let srg = write_srg(
        tmp.path(),
        &[("verbs", "fue ser VSIS3S0\nfue ir VMIS3S0\ncorriendo correr VMG0000\n")],
    );
    let store: EntryStore = [
        Entry::new("correr", "verb"),
        Entry::stub("corre", "verb", "correr"),
    ]
    .into_iter()
    .collect();

    let table = build_lemma_table(&store, &cde, &srg).unwrap();
    assert_eq!(table.get("fue", CoarsePos::Verb), Some("ir"));
    assert_eq!(table.get("corre", CoarsePos::Verb), Some("correr"));
    assert_eq!(table.get("corriendo", CoarsePos::Verb), Some("correr"));
    assert_eq!(table.get("ser", CoarsePos::Verb), Some("ser"));
}
