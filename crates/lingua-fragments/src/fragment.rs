//! Fragment types: typed annotations over a range of text.

use std::fmt;

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use crate::range::Range;

/// Globally unique fragment id.
pub type FragmentId = SmolStr;

/// Payload-less discriminant of [`FragmentData`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FragmentType {
    Word,
    Sentence,
    Mark,
    Note,
    Highlight,
    Background,
}

impl FragmentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FragmentType::Word => "Word",
            FragmentType::Sentence => "Sentence",
            FragmentType::Mark => "Mark",
            FragmentType::Note => "Note",
            FragmentType::Highlight => "Highlight",
            FragmentType::Background => "Background",
        }
    }
}

impl fmt::Display for FragmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A vocabulary word linked to a dictionary entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordData {
    pub dict_id: SmolStr,
}

/// A translated sentence.
///
/// `words` are the vocabulary words inside the sentence. Their ranges are
/// local to the sentence's own substring, and they are never present in the
/// owning Fragmentable's top-level collection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SentenceData {
    pub translation: String,
    pub words: Vec<WordFragment>,
}

/// A manual mark with an optional comment and display color.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MarkData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NoteData {
    pub note: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HighlightRole {
    #[default]
    Highlight,
    Deemphasize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HighlightData {
    pub role: HighlightRole,
}

/// Type-specific payload of a fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FragmentData {
    Word(WordData),
    Sentence(SentenceData),
    Mark(MarkData),
    Note(NoteData),
    Highlight(HighlightData),
    Background,
}

impl FragmentData {
    pub fn word(dict_id: impl Into<SmolStr>) -> Self {
        FragmentData::Word(WordData {
            dict_id: dict_id.into(),
        })
    }

    pub fn sentence(translation: impl Into<String>) -> Self {
        FragmentData::Sentence(SentenceData {
            translation: translation.into(),
            words: Vec::new(),
        })
    }

    pub fn fragment_type(&self) -> FragmentType {
        match self {
            FragmentData::Word(_) => FragmentType::Word,
            FragmentData::Sentence(_) => FragmentType::Sentence,
            FragmentData::Mark(_) => FragmentType::Mark,
            FragmentData::Note(_) => FragmentType::Note,
            FragmentData::Highlight(_) => FragmentType::Highlight,
            FragmentData::Background => FragmentType::Background,
        }
    }
}

/// A typed annotation over a range of its owner's root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub id: FragmentId,
    pub range: Range,
    pub data: FragmentData,
}

impl Fragment {
    pub fn new(id: impl Into<FragmentId>, range: Range, data: FragmentData) -> Self {
        Self {
            id: id.into(),
            range,
            data,
        }
    }

    pub fn fragment_type(&self) -> FragmentType {
        self.data.fragment_type()
    }

    pub fn as_sentence(&self) -> Option<&SentenceData> {
        match &self.data {
            FragmentData::Sentence(sentence) => Some(sentence),
            _ => None,
        }
    }

    pub fn as_sentence_mut(&mut self) -> Option<&mut SentenceData> {
        match &mut self.data {
            FragmentData::Sentence(sentence) => Some(sentence),
            _ => None,
        }
    }
}

/// A Word fragment nested inside a sentence, with a sentence-local range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordFragment {
    pub id: FragmentId,
    pub range: Range,
    pub data: WordData,
}

impl WordFragment {
    pub fn new(id: impl Into<FragmentId>, range: Range, dict_id: impl Into<SmolStr>) -> Self {
        Self {
            id: id.into(),
            range,
            data: WordData {
                dict_id: dict_id.into(),
            },
        }
    }
}

impl From<WordFragment> for Fragment {
    fn from(word: WordFragment) -> Self {
        Fragment {
            id: word.id,
            range: word.range,
            data: FragmentData::Word(word.data),
        }
    }
}

impl TryFrom<Fragment> for WordFragment {
    type Error = Fragment;

    /// Fails with the original fragment if it is not a Word.
    fn try_from(fragment: Fragment) -> Result<Self, Self::Error> {
        match fragment.data {
            FragmentData::Word(data) => Ok(WordFragment {
                id: fragment.id,
                range: fragment.range,
                data,
            }),
            _ => Err(fragment),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fragment_type_dispatch() {
        assert_eq!(FragmentData::word("d1").fragment_type(), FragmentType::Word);
        assert_eq!(
            FragmentData::sentence("hello").fragment_type(),
            FragmentType::Sentence
        );
        assert_eq!(FragmentData::Background.fragment_type(), FragmentType::Background);
        assert_eq!(FragmentType::Highlight.to_string(), "Highlight");
    }

    #[test]
    fn test_word_conversion() {
        let word = WordFragment::new("w1", Range::new(2, 5), "dict-7");
        let fragment: Fragment = word.clone().into();
        assert_eq!(fragment.fragment_type(), FragmentType::Word);
        assert_eq!(WordFragment::try_from(fragment), Ok(word));

        let mark = Fragment::new("m1", Range::new(0, 1), FragmentData::Mark(MarkData::default()));
        assert!(WordFragment::try_from(mark).is_err());
    }
}
