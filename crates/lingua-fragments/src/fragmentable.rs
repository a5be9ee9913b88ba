//! A text root plus the fragments attached to it.

use smol_str::SmolStr;

use crate::fragment::{Fragment, FragmentData, FragmentId, WordFragment};
use crate::range::Range;
use crate::text::utf16_len;

/// A named text root and its annotations.
///
/// Top-level fragments are kept in insertion order. Words nested inside a
/// sentence live only in that sentence's payload.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Fragmentable {
    pub id: SmolStr,
    pub root: String,
    pub fragments: Vec<Fragment>,
    /// Render override: dim everything except this fragment.
    pub highlighted_fragment: Option<FragmentId>,
    pub show_spelling: bool,
}

/// Where a fragment lives inside a [`Fragmentable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FragmentLocation {
    TopLevel(usize),
    Nested { sentence: usize, word: usize },
}

/// Borrowed view of a fragment found by id.
#[derive(Debug, Clone, Copy)]
pub enum FoundFragment<'a> {
    TopLevel(&'a Fragment),
    Nested {
        sentence: &'a Fragment,
        word: &'a WordFragment,
    },
}

impl FoundFragment<'_> {
    pub fn id(&self) -> &FragmentId {
        match self {
            FoundFragment::TopLevel(fragment) => &fragment.id,
            FoundFragment::Nested { word, .. } => &word.id,
        }
    }

    /// Range in the Fragmentable's own coordinate frame, or `None` when a
    /// nested word's offsets overflow.
    pub fn global_range(&self) -> Option<Range> {
        match self {
            FoundFragment::TopLevel(fragment) => Some(fragment.range),
            FoundFragment::Nested { sentence, word } => word.range.shift(sentence.range.start),
        }
    }
}

impl Fragmentable {
    pub fn new(id: impl Into<SmolStr>, root: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            root: root.into(),
            ..Default::default()
        }
    }

    pub fn with_fragments(mut self, fragments: Vec<Fragment>) -> Self {
        self.fragments = fragments;
        self
    }

    /// Length of the root in UTF-16 code units.
    pub fn len(&self) -> usize {
        utf16_len(&self.root)
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    pub fn locate(&self, id: &str) -> Option<FragmentLocation> {
        for (idx, fragment) in self.fragments.iter().enumerate() {
            if fragment.id == id {
                return Some(FragmentLocation::TopLevel(idx));
            }
            if let FragmentData::Sentence(sentence) = &fragment.data {
                if let Some(word) = sentence.words.iter().position(|w| w.id == id) {
                    return Some(FragmentLocation::Nested {
                        sentence: idx,
                        word,
                    });
                }
            }
        }
        None
    }

    pub fn find(&self, id: &str) -> Option<FoundFragment<'_>> {
        match self.locate(id)? {
            FragmentLocation::TopLevel(idx) => Some(FoundFragment::TopLevel(&self.fragments[idx])),
            FragmentLocation::Nested { sentence, word } => {
                let parent = &self.fragments[sentence];
                let word = parent.as_sentence()?.words.get(word)?;
                Some(FoundFragment::Nested {
                    sentence: parent,
                    word,
                })
            }
        }
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.locate(id).is_some()
    }

    /// The fragment the render override currently points at, if it exists.
    pub fn highlighted(&self) -> Option<FoundFragment<'_>> {
        self.highlighted_fragment
            .as_deref()
            .and_then(|id| self.find(id))
    }

    /// Set the render override. Unknown ids are ignored and return false.
    pub fn set_highlight(&mut self, id: &str) -> bool {
        if self.contains_id(id) {
            self.highlighted_fragment = Some(id.into());
            true
        } else {
            false
        }
    }

    pub fn clear_highlight(&mut self) {
        self.highlighted_fragment = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fragment::SentenceData;

    fn sample() -> Fragmentable {
        Fragmentable::new("f1", "Der Hund schläft. Gut.").with_fragments(vec![
            Fragment::new(
                "s1",
                Range::new(0, 17),
                FragmentData::Sentence(SentenceData {
                    translation: "The dog sleeps.".into(),
                    words: vec![WordFragment::new("w1", Range::new(4, 8), "hund")],
                }),
            ),
            Fragment::new("w2", Range::new(18, 21), FragmentData::word("gut")),
        ])
    }

    #[test]
    fn test_locate_top_level_and_nested() {
        let f = sample();
        assert_eq!(f.locate("s1"), Some(FragmentLocation::TopLevel(0)));
        assert_eq!(f.locate("w2"), Some(FragmentLocation::TopLevel(1)));
        assert_eq!(
            f.locate("w1"),
            Some(FragmentLocation::Nested {
                sentence: 0,
                word: 0
            })
        );
        assert_eq!(f.locate("nope"), None);
    }

    #[test]
    fn test_nested_global_range() {
        let f = sample();
        let found = f.find("w1").unwrap();
        assert_eq!(found.id(), "w1");
        assert_eq!(found.global_range(), Some(Range::new(4, 8)));
    }

    #[test]
    fn test_set_highlight_requires_known_id() {
        let mut f = sample();
        assert!(!f.set_highlight("missing"));
        assert!(f.highlighted_fragment.is_none());
        assert!(f.set_highlight("w2"));
        assert_eq!(f.highlighted().unwrap().global_range(), Some(Range::new(18, 21)));
        f.clear_highlight();
        assert!(f.highlighted().is_none());
    }

    #[test]
    fn test_len_counts_utf16_units() {
        assert_eq!(sample().len(), 22);
    }
}
