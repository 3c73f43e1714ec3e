//! Splits raw gloss lines into `{label, definition, gloss}` triples.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;
use wiktionary_types::{Definition, RawSense};

// `(label) definition (gloss)`, both parentheticals optional.
static GLOSS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:\(([^)]*)\))?(.*?)\s*(?:\(([^)]*)\))?\n?$").expect("gloss pattern compiles")
});

/// Sense tags that are surfaced as labels, with the label text they map to.
const TAGS_AS_LABELS: [(&str, &str); 3] = [
    ("uncountable", "uncountable"),
    ("plural-only", "only in the plural"),
    ("invariable", "invariable"),
];

#[derive(Debug, Error)]
#[error("gloss does not fit the label/definition/gloss layout: {0:?}")]
pub struct GlossMismatch(pub String);

/// Labels derived from a sense's tags, sorted.
pub fn tag_labels(sense: &RawSense) -> Vec<&'static str> {
    let mut labels: Vec<&'static str> = sense
        .tags()
        .iter()
        .filter_map(|tag| {
            TAGS_AS_LABELS
                .iter()
                .find(|(name, _)| name == tag)
                .map(|(_, label)| *label)
        })
        .collect();
    labels.sort_unstable();
    labels
}

/// Split one gloss line, appending any `extra_labels` not already mentioned in it.
pub fn clean_gloss(raw: Option<&str>, extra_labels: &[&str]) -> Result<Definition, GlossMismatch> {
    let Some(raw) = raw else {
        return Ok(Definition::default());
    };
    let caps = GLOSS_RE
        .captures(raw)
        .ok_or_else(|| GlossMismatch(raw.to_string()))?;

    let mut label = caps.get(1).map(|m| m.as_str().to_string());
    let definition = caps
        .get(2)
        .map(|m| m.as_str().trim())
        .filter(|d| !d.is_empty())
        .map(str::to_string);
    let gloss = caps.get(3).map(|m| m.as_str().to_string());

    let extra = extra_labels
        .iter()
        .filter(|l| !raw.contains(**l))
        .copied()
        .collect::<Vec<_>>()
        .join(", ");
    if !extra.is_empty() {
        label = Some(match label {
            Some(existing) => format!("{existing}, {extra}"),
            None => extra,
        });
    }

    Ok(Definition {
        label,
        definition,
        gloss,
    })
}

/// The text that represents a sense: its single raw gloss, or its glosses joined.
pub fn sense_text(sense: &RawSense) -> Option<String> {
    if let Some(raw) = sense.raw_glosses.as_deref()
        && raw.len() == 1
    {
        return Some(raw[0].clone());
    }
    let glosses = sense.glosses();
    if glosses.is_empty() {
        return None;
    }
    Some(
        glosses
            .iter()
            .map(|g| remove_ending_colon(g))
            .collect::<Vec<_>>()
            .join(", "),
    )
}

/// Definitions for each sense in order.
pub fn clean_senses(senses: &[&RawSense]) -> Result<Vec<Definition>, GlossMismatch> {
    senses
        .iter()
        .map(|sense| {
            let labels = tag_labels(sense);
            clean_gloss(sense_text(sense).as_deref(), &labels)
        })
        .collect()
}

pub(crate) fn remove_ending_colon(s: &str) -> &str {
    s.strip_suffix(':').unwrap_or(s)
}
