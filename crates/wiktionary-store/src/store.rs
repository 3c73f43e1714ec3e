use std::collections::BTreeMap;

use wiktionary_types::Entry;

/// Word → entries mapping shared by every post-processing phase.
///
/// Keys are case-sensitive. A key is present only while it has at least one
/// entry; [`EntryStore::replace`] with an empty list removes the key.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EntryStore {
    words: BTreeMap<String, Vec<Entry>>,
}

impl EntryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry under its own word.
    pub fn push(&mut self, entry: Entry) {
        self.words.entry(entry.word.clone()).or_default().push(entry);
    }

    /// Entries stored under `word`, or an empty slice.
    pub fn get(&self, word: &str) -> &[Entry] {
        self.words.get(word).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn get_mut(&mut self, word: &str) -> Option<&mut Vec<Entry>> {
        self.words.get_mut(word)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains_key(word)
    }

    /// Remove and return every entry stored under `word`.
    pub fn remove(&mut self, word: &str) -> Option<Vec<Entry>> {
        self.words.remove(word)
    }

    /// Store `entries` under `word`, dropping the key when the list is empty.
    pub fn replace(&mut self, word: &str, entries: Vec<Entry>) {
        if entries.is_empty() {
            self.words.remove(word);
        } else {
            self.words.insert(word.to_string(), entries);
        }
    }

    /// Snapshot of the current keys, for phases that mutate while walking.
    pub fn words(&self) -> Vec<String> {
        self.words.keys().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Entry])> + '_ {
        self.words.iter().map(|(w, e)| (w.as_str(), e.as_slice()))
    }

    pub fn entries(&self) -> impl Iterator<Item = &Entry> + '_ {
        self.words.values().flatten()
    }

    pub fn entries_mut(&mut self) -> impl Iterator<Item = &mut Entry> + '_ {
        self.words.values_mut().flatten()
    }

    /// Number of distinct words.
    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    /// Number of entries across all words.
    pub fn entry_count(&self) -> usize {
        self.words.values().map(Vec::len).sum()
    }
}

impl FromIterator<Entry> for EntryStore {
    fn from_iter<I: IntoIterator<Item = Entry>>(iter: I) -> Self {
        let mut store = EntryStore::new();
        for entry in iter {
            store.push(entry);
        }
        store
    }
}

impl Extend<Entry> for EntryStore {
    fn extend<I: IntoIterator<Item = Entry>>(&mut self, iter: I) {
        for entry in iter {
            self.push(entry);
        }
    }
}
