//! Shared types mirroring wiktextract word records and the consolidated
//! dictionary entries built from them.
//!
//! Raw records ([`RawRecord`], [`RawSense`]) are deserialized as-is from the
//! line-delimited dump; unknown fields are ignored. Consolidated records
//! ([`Entry`], [`Definition`]) serialize only their populated fields, so the
//! dictionary output stays compact.
//!
//! Use [`CoarsePos`] to collapse Wiktionary's part-of-speech labels into the
//! four-way tag set shared with the frequency corpora.
//!
//! ```rust
//! use wiktionary_types::{CoarsePos, Entry};
//!
//! let entry = Entry::stub("casas", "noun", "casa");
//! assert_eq!(entry.f_pos, CoarsePos::Noun);
//! assert!(entry.from_forms);
//! assert_eq!(CoarsePos::from_wiktionary("adv").to_char(), 'r');
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Coarse part-of-speech tag (`a`, `n`, `r`, `v`, with `o` for everything else).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum CoarsePos {
    #[serde(rename = "a")]
    Adjective,
    #[serde(rename = "n")]
    Noun,
    #[serde(rename = "r")]
    Adverb,
    #[serde(rename = "v")]
    Verb,
    #[serde(rename = "o")]
    Other,
}

impl CoarsePos {
    /// Map a Wiktionary `pos` label onto the coarse tag set.
    pub fn from_wiktionary(pos: &str) -> Self {
        match pos {
            "adj" => CoarsePos::Adjective,
            "adv" => CoarsePos::Adverb,
            "noun" | "name" | "num" => CoarsePos::Noun,
            "verb" => CoarsePos::Verb,
            _ => CoarsePos::Other,
        }
    }

    /// Parse the single-letter tag used in lemma tables.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'a' => Some(CoarsePos::Adjective),
            'n' => Some(CoarsePos::Noun),
            'r' => Some(CoarsePos::Adverb),
            'v' => Some(CoarsePos::Verb),
            'o' => Some(CoarsePos::Other),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            CoarsePos::Adjective => 'a',
            CoarsePos::Noun => 'n',
            CoarsePos::Adverb => 'r',
            CoarsePos::Verb => 'v',
            CoarsePos::Other => 'o',
        }
    }
}

impl fmt::Display for CoarsePos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CoarsePos::Adjective => "adj",
            CoarsePos::Noun => "noun",
            CoarsePos::Adverb => "adv",
            CoarsePos::Verb => "verb",
            CoarsePos::Other => "other",
        })
    }
}

/// Grammatical gender marker carried by an entry.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "m")]
    Masculine,
    #[serde(rename = "f")]
    Feminine,
}

impl Gender {
    /// Collect gender markers from sense tags, masculine before feminine.
    pub fn from_tags(tags: &[String]) -> Vec<Gender> {
        let mut out = Vec::new();
        if tags.iter().any(|t| t == "masculine") {
            out.push(Gender::Masculine);
        }
        if tags.iter().any(|t| t == "feminine") {
            out.push(Gender::Feminine);
        }
        out
    }
}

/// `{word}` reference found in `form_of` / `alt_of`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct WordRef {
    pub word: String,
}

/// One sense of a raw word record.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RawSense {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form_of: Option<Vec<WordRef>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt_of: Option<Vec<WordRef>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub glosses: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_glosses: Option<Vec<String>>,
}

impl RawSense {
    pub fn tags(&self) -> &[String] {
        self.tags.as_deref().unwrap_or(&[])
    }

    pub fn glosses(&self) -> &[String] {
        self.glosses.as_deref().unwrap_or(&[])
    }

    /// Word named by the first `form_of` reference, if any.
    pub fn form_of_word(&self) -> Option<&str> {
        self.form_of
            .as_ref()
            .and_then(|refs| refs.first())
            .map(|r| r.word.as_str())
    }
}

/// Surface form listed on a raw record.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct RawForm {
    pub form: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Head template invocation; only its arguments are consulted.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct HeadTemplate {
    #[serde(default)]
    pub args: BTreeMap<String, String>,
}

/// One word record from the wiktextract dump.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    pub word: String,
    pub pos: String,
    #[serde(default)]
    pub senses: Vec<RawSense>,
    #[serde(default)]
    pub forms: Vec<RawForm>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub head_templates: Option<Vec<HeadTemplate>>,
}

/// Structured definition split out of a gloss line.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Definition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub definition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gloss: Option<String>,
}

impl Definition {
    pub fn text(definition: impl Into<String>) -> Self {
        Self {
            definition: Some(definition.into()),
            ..Self::default()
        }
    }
}

/// Consolidated dictionary entry: one per sense group of a raw record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub word: String,
    pub pos: String,
    pub f_pos: CoarsePos,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forms: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_forms: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form_of: Option<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub from_alt_of: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub from_forms: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Vec<Gender>>,
    #[serde(default)]
    pub definitions: Vec<Definition>,
}

impl Entry {
    /// Base entry with no links, forms, or definitions.
    pub fn new(word: impl Into<String>, pos: impl Into<String>) -> Self {
        let pos = pos.into();
        Self {
            word: word.into(),
            f_pos: CoarsePos::from_wiktionary(&pos),
            pos,
            forms: None,
            full_forms: None,
            form_of: None,
            from_alt_of: false,
            from_forms: false,
            gender: None,
            definitions: Vec::new(),
        }
    }

    /// Reciprocal stub linking `form` back to `lemma`.
    pub fn stub(form: impl Into<String>, pos: impl Into<String>, lemma: impl Into<String>) -> Self {
        Self {
            form_of: Some(lemma.into()),
            from_forms: true,
            ..Self::new(form, pos)
        }
    }

    pub fn forms(&self) -> &[String] {
        self.forms.as_deref().unwrap_or(&[])
    }

    pub fn has_form(&self, form: &str) -> bool {
        self.forms().iter().any(|f| f == form)
    }

    pub fn is_single_token(&self) -> bool {
        self.word.split_whitespace().count() == 1
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}
