//! File-backed dictionary for render-time lookups.
//!
//! The file is a JSON array of entries:
//!
//! ```json
//! [{"id": "neko", "text": "猫", "translation": "cat", "spelling": "ねこ"}]
//! ```

use std::collections::HashMap;
use std::path::Path;

use lingua_fragments::{DictionaryEntry, DictionaryResolver};
use smol_str::SmolStr;

use crate::error::{LinguaError, ParseError};

#[derive(Debug, Clone, Default)]
pub struct DictionaryStore {
    entries: HashMap<SmolStr, DictionaryEntry>,
}

impl DictionaryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Later entries win when ids repeat.
    pub fn from_entries(entries: impl IntoIterator<Item = DictionaryEntry>) -> Self {
        let mut store = Self::new();
        for entry in entries {
            store.insert(entry);
        }
        store
    }

    /// Parse a JSON array of entries. `name` labels parse errors.
    pub fn from_json(name: &str, json: &str) -> Result<Self, LinguaError> {
        let entries: Vec<DictionaryEntry> =
            serde_json::from_str(json).map_err(|err| ParseError::json(name, json, &err))?;
        Ok(Self::from_entries(entries))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, LinguaError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|err| LinguaError::io(path, err))?;
        let store = Self::from_json(&path.display().to_string(), &json)?;
        tracing::debug!(path = %path.display(), entries = store.len(), "loaded dictionary");
        Ok(store)
    }

    /// Returns the entry previously stored under the same id.
    pub fn insert(&mut self, entry: DictionaryEntry) -> Option<DictionaryEntry> {
        self.entries.insert(entry.id.clone(), entry)
    }

    pub fn get(&self, id: &str) -> Option<&DictionaryEntry> {
        self.entries.get(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl DictionaryResolver for DictionaryStore {
    fn resolve(&self, id: &str) -> Option<&DictionaryEntry> {
        self.get(id)
    }
}
