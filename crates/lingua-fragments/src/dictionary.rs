//! Dictionary lookups for Word fragments.
//!
//! Entries are owned by the caller's dictionary store. The engine only ever
//! borrows them at render time through [`DictionaryResolver`].

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DictionaryEntry {
    pub id: SmolStr,
    /// The headword as written.
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translation: Option<String>,
    /// Phonetic spelling (reading), if the language needs one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spelling: Option<String>,
}

/// Resolves dictionary ids from Word fragments to entries.
pub trait DictionaryResolver {
    fn resolve(&self, id: &str) -> Option<&DictionaryEntry>;
}

/// No dictionary: nothing resolves.
impl DictionaryResolver for () {
    fn resolve(&self, _id: &str) -> Option<&DictionaryEntry> {
        None
    }
}

impl DictionaryResolver for HashMap<SmolStr, DictionaryEntry> {
    fn resolve(&self, id: &str) -> Option<&DictionaryEntry> {
        self.get(id)
    }
}

impl DictionaryResolver for [DictionaryEntry] {
    fn resolve(&self, id: &str) -> Option<&DictionaryEntry> {
        self.iter().find(|e| e.id == id)
    }
}

impl<T: DictionaryResolver + ?Sized> DictionaryResolver for &T {
    fn resolve(&self, id: &str) -> Option<&DictionaryEntry> {
        (**self).resolve(id)
    }
}

impl<T: DictionaryResolver> DictionaryResolver for Option<T> {
    fn resolve(&self, id: &str) -> Option<&DictionaryEntry> {
        self.as_ref().and_then(|r| r.resolve(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, text: &str, spelling: Option<&str>) -> DictionaryEntry {
        DictionaryEntry {
            id: id.into(),
            text: text.into(),
            translation: None,
            spelling: spelling.map(Into::into),
        }
    }

    #[test]
    fn test_map_resolver() {
        let mut map = HashMap::new();
        map.insert(SmolStr::new("neko"), entry("neko", "猫", Some("ねこ")));
        assert_eq!(map.resolve("neko").unwrap().spelling.as_deref(), Some("ねこ"));
        assert!(map.resolve("inu").is_none());
    }

    #[test]
    fn test_unit_and_option() {
        assert!(().resolve("anything").is_none());
        let entries = vec![entry("a", "a", None)];
        let some = Some(entries.as_slice());
        assert!(some.resolve("a").is_some());
        let none: Option<&[DictionaryEntry]> = None;
        assert!(none.resolve("a").is_none());
    }

    #[test]
    fn test_entry_json_shape() {
        let json = r#"{"id":"d1","text":"Hund","translation":"dog"}"#;
        let parsed: DictionaryEntry = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.translation.as_deref(), Some("dog"));
        assert_eq!(serde_json::to_string(&parsed).unwrap(), json);
    }
}
