//! Turns one raw word record into consolidated entries, one per sense group.
//!
//! Before grouping, two classes of extraction failure in the source data are
//! repaired: verb records whose head template marks them as inflected forms
//! but whose senses never received a `form_of`, and clitic-combined verb
//! forms whose `form_of` is a phrase rather than a word.

use std::sync::LazyLock;

use regex::Regex;
use wiktionary_types::{Definition, Entry, Gender, RawForm, RawRecord, RawSense, WordRef};

use crate::error::StoreError;
use crate::gloss::{self, GlossMismatch};

/// Conjugation words that can trail the lemma in a failed form-of gloss.
const CONJUGATION_KEYWORDS: [&str; 5] = [
    "infinitive",
    "gerund",
    "preterite",
    "imperfect",
    "indicative",
];

static CONJUGATION_RES: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    CONJUGATION_KEYWORDS
        .iter()
        .map(|kw| {
            let re = Regex::new(&format!(r"\b{}\b\s+(\w+)", regex::escape(kw)))
                .expect("conjugation pattern compiles");
            (*kw, re)
        })
        .collect()
});

const EXCLUDED_FORM_TAGS: [&str; 3] = ["table-tags", "inflection-template", "class"];

/// Head template argument that marks a noun with paired masculine/feminine forms.
const MF_EQUIV_ARG: &str = "mfequiv";

/// Build the entries for one record.
pub fn build_entries(mut record: RawRecord) -> Result<Vec<Entry>, StoreError> {
    repair_record(&mut record);

    let forms = extract_inflected_forms(&record.forms);
    let mf_equiv = record
        .head_templates
        .iter()
        .flatten()
        .any(|t| t.args.values().any(|v| v == MF_EQUIV_ARG));

    let mut entries = Vec::new();
    for group in group_senses(&record.senses) {
        let mut entry = Entry::new(record.word.as_str(), record.pos.as_str());
        entry.forms = forms.clone();
        fill_from_group(&mut entry, &group).map_err(|GlossMismatch(gloss)| {
            StoreError::MalformedGloss {
                word: record.word.clone(),
                gloss,
            }
        })?;

        let gender = Gender::from_tags(group[0].tags());
        if !gender.is_empty() {
            entry.gender = Some(gender);
        } else if mf_equiv {
            entry.gender = Some(vec![Gender::Masculine, Gender::Feminine]);
        }
        entries.push(entry);
    }
    Ok(entries)
}

fn fill_from_group(entry: &mut Entry, group: &[&RawSense]) -> Result<(), GlossMismatch> {
    let Some(lemma) = group[0].form_of_word() else {
        entry.definitions = gloss::clean_senses(group)?;
        return Ok(());
    };
    entry.form_of = Some(lemma.to_string());
    entry.from_alt_of = group.iter().any(|s| s.alt_of.is_some());
    entry.definitions = if group.len() == 1 {
        gloss::clean_senses(group)?
    } else {
        multiple_form_of_definitions(group, lemma)
    };
    Ok(())
}

fn repair_record(record: &mut RawRecord) {
    for sense in &mut record.senses {
        if let Some(alt) = sense.alt_of.as_ref().filter(|alt| !alt.is_empty()) {
            sense.form_of = Some(alt.clone());
        }
    }

    if is_failed_form_of(record) {
        repair_failed_form_of(record);
        return;
    }
    if record.pos == "verb" && record.senses.iter().any(is_combined_with_form_of) {
        for sense in record
            .senses
            .iter_mut()
            .filter(|s| is_combined_with_form_of(s))
        {
            for reference in sense.form_of.iter_mut().flatten() {
                if let Some(first) = reference.word.split(' ').next() {
                    reference.word = first.to_string();
                }
            }
        }
    }
}

fn is_failed_form_of(record: &RawRecord) -> bool {
    let Some(templates) = record.head_templates.as_ref() else {
        return false;
    };
    templates
        .iter()
        .any(|t| t.args.get("2").is_some_and(|v| v.contains("form")))
        && !record.senses.iter().any(|s| s.form_of.is_some())
}

fn repair_failed_form_of(record: &mut RawRecord) {
    if record.pos != "verb" {
        return;
    }
    if record.senses.iter().all(|s| s.glosses().len() == 1) {
        if let [only] = record.senses.as_mut_slice() {
            let lemma = extract_form_of(&only.glosses()[0]);
            only.form_of = Some(vec![WordRef { word: lemma }]);
        }
        return;
    }
    for sense in &mut record.senses {
        if let Some(line) = sense.glosses().get(1) {
            let lemma = extract_form_of(line);
            sense.form_of = Some(vec![WordRef { word: lemma }]);
        }
    }
}

/// Guess the lemma named at the end of an inflection gloss such as
/// `"first-person singular present indicative of tener"`.
pub fn extract_form_of(gloss: &str) -> String {
    let tail = gloss.rsplit(" of ").next().unwrap_or(gloss);
    if tail.split(' ').count() == 1 {
        return tail.to_string();
    }
    for (keyword, re) in CONJUGATION_RES.iter() {
        if tail.contains(keyword)
            && let Some(caps) = re.captures(tail)
        {
            return caps[1].to_string();
        }
    }
    tail.split(',').next().unwrap_or(tail).to_string()
}

fn is_combined_with_form_of(sense: &RawSense) -> bool {
    sense.form_of.iter().flatten().any(|r| {
        r.word.split(' ').count() > 1 && r.word.contains("combined with")
    })
}

#[derive(PartialEq)]
struct GroupKey<'a> {
    labels: Vec<&'static str>,
    gender: Vec<Gender>,
    lemma: Option<&'a str>,
}

fn group_senses(senses: &[RawSense]) -> Vec<Vec<&RawSense>> {
    let mut groups: Vec<(GroupKey<'_>, Vec<&RawSense>)> = Vec::new();
    for sense in senses {
        let key = GroupKey {
            labels: gloss::tag_labels(sense),
            gender: Gender::from_tags(sense.tags()),
            lemma: sense.form_of_word(),
        };
        match groups.iter_mut().find(|(k, _)| *k == key) {
            Some((_, group)) => group.push(sense),
            None => groups.push((key, vec![sense])),
        }
    }
    groups.into_iter().map(|(_, group)| group).collect()
}

fn multiple_form_of_definitions(group: &[&RawSense], lemma: &str) -> Vec<Definition> {
    if group.iter().any(|s| s.glosses().len() != 2) {
        return group
            .iter()
            .map(|s| Definition {
                definition: s.glosses().first().cloned(),
                ..Definition::default()
            })
            .collect();
    }

    let first_line = group[0].glosses()[0].lines().next().unwrap_or_default();
    let lemma_phrase = first_line
        .split(" of ")
        .nth(1)
        .map(|phrase| gloss::remove_ending_colon(phrase.trim()))
        .unwrap_or(lemma);

    group
        .iter()
        .map(|s| {
            let mut definition = s.glosses()[1].clone();
            if !definition.ends_with(lemma_phrase) {
                definition.push_str(" of ");
                definition.push_str(lemma_phrase);
            }
            Definition::text(definition)
        })
        .collect()
}

fn extract_inflected_forms(forms: &[RawForm]) -> Option<Vec<String>> {
    let kept: Vec<String> = forms
        .iter()
        .filter(|f| !f.tags.iter().any(|t| EXCLUDED_FORM_TAGS.contains(&t.as_str())))
        .filter(|f| f.form != "-")
        .map(|f| f.form.clone())
        .collect();
    if kept.is_empty() { None } else { Some(kept) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(json: &str) -> RawRecord {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn base_record_yields_definitions() {
        let entries = build_entries(record(
            r#"{"word":"casa","pos":"noun",
                "forms":[{"form":"casas","tags":["plural"]},
                         {"form":"es-noun","tags":["inflection-template"]},
                         {"form":"-","tags":[]}],
                "senses":[{"tags":["feminine"],"glosses":["house"]},
                          {"tags":["feminine"],"raw_glosses":["(figuratively) home"]}]}"#,
        ))
        .unwrap();
        assert_eq!(entries.len(), 1);
        let casa = &entries[0];
        assert_eq!(casa.forms.as_deref(), Some(&["casas".to_string()][..]));
        assert_eq!(casa.gender, Some(vec![Gender::Feminine]));
        assert_eq!(casa.form_of, None);
        assert_eq!(casa.definitions.len(), 2);
        assert_eq!(casa.definitions[1].label.as_deref(), Some("figuratively"));
    }

    #[test]
    fn single_form_of_sense_keeps_definition() {
        let entries = build_entries(record(
            r#"{"word":"corre","pos":"verb","senses":[
                {"form_of":[{"word":"correr"}],"glosses":["(informal) third person of correr"]}]}"#,
        ))
        .unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].form_of.as_deref(), Some("correr"));
        assert_eq!(entries[0].definitions[0].label.as_deref(), Some("informal"));
        assert!(!entries[0].from_alt_of);
    }

    #[test]
    fn groups_split_on_tags_gender_and_lemma() {
        let entries = build_entries(record(
            r#"{"word":"orden","pos":"noun","senses":[
                {"tags":["masculine"],"glosses":["order, arrangement"]},
                {"tags":["feminine"],"glosses":["command"]},
                {"tags":["masculine"],"glosses":["sequence"]},
                {"tags":["masculine","uncountable"],"glosses":["orderliness"]}]}"#,
        ))
        .unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].definitions.len(), 2);
        assert_eq!(entries[1].gender, Some(vec![Gender::Feminine]));
        assert_eq!(
            entries[2].definitions[0].label.as_deref(),
            Some("uncountable")
        );
    }

    #[test]
    fn alt_of_becomes_form_of() {
        let entries = build_entries(record(
            r#"{"word":"setiembre","pos":"noun","senses":[
                {"alt_of":[{"word":"septiembre"}],"glosses":["Alternative form of septiembre"]}]}"#,
        ))
        .unwrap();
        assert_eq!(entries[0].form_of.as_deref(), Some("septiembre"));
        assert!(entries[0].from_alt_of);
    }

    #[test]
    fn multiple_form_of_senses_share_lemma_phrase() {
        let entries = build_entries(record(
            r#"{"word":"tengo","pos":"verb","senses":[
                {"form_of":[{"word":"tener"}],"glosses":["inflection of tener:","first-person singular present indicative"]},
                {"form_of":[{"word":"tener"}],"glosses":["inflection of tener:","first-person singular present of tener"]}]}"#,
        ))
        .unwrap();
        assert_eq!(entries.len(), 1);
        let defs: Vec<_> = entries[0]
            .definitions
            .iter()
            .map(|d| d.definition.as_deref().unwrap())
            .collect();
        assert_eq!(
            defs,
            vec![
                "first-person singular present indicative of tener",
                "first-person singular present of tener",
            ]
        );
    }

    #[test]
    fn irregular_multiple_form_of_falls_back_to_first_line() {
        let entries = build_entries(record(
            r#"{"word":"fue","pos":"verb","senses":[
                {"form_of":[{"word":"ir"}],"glosses":["third-person singular preterite of ir"]},
                {"form_of":[{"word":"ir"}],"glosses":["inflection of ir:","a","b"]}]}"#,
        ))
        .unwrap();
        assert_eq!(
            entries[0].definitions,
            vec![
                Definition::text("third-person singular preterite of ir"),
                Definition::text("inflection of ir:"),
            ]
        );
    }

    #[test]
    fn repairs_failed_form_of_from_gloss() {
        let entries = build_entries(record(
            r#"{"word":"hablé","pos":"verb",
                "head_templates":[{"args":{"1":"es","2":"verb form"}}],
                "senses":[{"glosses":["first-person singular preterite indicative of hablar"]}]}"#,
        ))
        .unwrap();
        assert_eq!(entries[0].form_of.as_deref(), Some("hablar"));
    }

    #[test]
    fn failed_form_of_senses_use_second_gloss_line() {
        let entries = build_entries(record(
            r#"{"word":"hablando","pos":"verb",
                "head_templates":[{"args":{"1":"es","2":"verb form"}}],
                "senses":[
                    {"glosses":["inflection of hablar:","first-person singular preterite indicative of hablar"]},
                    {"glosses":["inflection of correr:","gerund of correr"]},
                    {"glosses":["a verb form"]}]}"#,
        ))
        .unwrap();
        let lemmas: Vec<_> = entries.iter().map(|e| e.form_of.as_deref()).collect();
        assert_eq!(lemmas, vec![Some("hablar"), Some("correr"), None]);
    }

    #[test]
    fn several_single_line_senses_are_not_repaired() {
        let entries = build_entries(record(
            r#"{"word":"habló","pos":"verb",
                "head_templates":[{"args":{"1":"es","2":"verb form"}}],
                "senses":[
                    {"glosses":["third-person singular preterite indicative of hablar"]},
                    {"glosses":["second-person formal singular preterite indicative of hablar"]}]}"#,
        ))
        .unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].form_of, None);
        assert_eq!(entries[0].definitions.len(), 2);
    }

    #[test]
    fn failed_form_of_repair_skips_combined_with_repair() {
        let entries = build_entries(record(
            r#"{"word":"dame","pos":"verb",
                "head_templates":[{"args":{"1":"es","2":"verb form"}}],
                "senses":[{"glosses":["imperative of da combined with me"]}]}"#,
        ))
        .unwrap();
        assert_eq!(entries[0].form_of.as_deref(), Some("da combined with me"));
    }

    #[test]
    fn extract_form_of_trims_conjugation_words() {
        assert_eq!(extract_form_of("gerund of correr"), "correr");
        assert_eq!(
            extract_form_of("inflection of haber combined with infinitive hacer"),
            "hacer"
        );
        assert_eq!(extract_form_of("plural of casa blanca, white houses"), "casa blanca");
    }

    #[test]
    fn combined_with_form_of_keeps_first_token() {
        let entries = build_entries(record(
            r#"{"word":"dámelo","pos":"verb","senses":[
                {"form_of":[{"word":"da combined with me and lo"}],"glosses":["da combined with me and lo"]}]}"#,
        ))
        .unwrap();
        assert_eq!(entries[0].form_of.as_deref(), Some("da"));
    }

    #[test]
    fn mfequiv_head_template_implies_both_genders() {
        let entries = build_entries(record(
            r#"{"word":"estudiante","pos":"noun",
                "head_templates":[{"args":{"1":"mfequiv"}}],
                "senses":[{"glosses":["student"]}]}"#,
        ))
        .unwrap();
        assert_eq!(
            entries[0].gender,
            Some(vec![Gender::Masculine, Gender::Feminine])
        );
    }

    #[test]
    fn malformed_gloss_aborts_record() {
        let err = build_entries(record(
            r#"{"word":"roto","pos":"adj","senses":[{"raw_glosses":["broken\nline"]}]}"#,
        ))
        .unwrap_err();
        assert!(matches!(err, StoreError::MalformedGloss { ref word, .. } if word == "roto"));
    }
}
