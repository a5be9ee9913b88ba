//! Fragment mutation: wrap, unwrap, add, remove and update.
//!
//! Every operation either fully applies or leaves the Fragmentable untouched.
//! All validation happens before the first write.

use crate::error::{FragmentError, Result};
use crate::fragment::{Fragment, FragmentData, FragmentId, FragmentType, WordData, WordFragment};
use crate::fragmentable::{FragmentLocation, Fragmentable};
use crate::ids::IdGenerator;
use crate::query::{IntersectType, intersecting, normalize_range};
use crate::range::Range;
use crate::text::Utf16Index;

impl Fragmentable {
    /// Annotate `selection` with a new fragment built from `data`.
    ///
    /// Whatever the selection intersects is replaced, with two exceptions:
    /// a new Word touching exactly one Sentence is nested inside it, and a new
    /// Sentence keeps the Words it fully covers as its children.
    ///
    /// Returns `Ok(None)` without touching anything when there is no selection
    /// or the selection is collapsed.
    pub fn wrap_selection(
        &mut self,
        selection: Option<Range>,
        data: FragmentData,
        ids: &mut impl IdGenerator,
    ) -> Result<Option<FragmentId>> {
        let Some(selection) = selection.map(Range::ordered) else {
            return Ok(None);
        };
        if selection.is_empty() {
            return Ok(None);
        }
        self.check_bounds(selection)?;

        let matches = intersecting(selection, &self.fragments);

        if let FragmentData::Word(word) = &data {
            if let [only] = matches.as_slice() {
                if only.fragment.fragment_type() == FragmentType::Sentence {
                    let container = only.fragment.range;
                    let local = normalize_range(container, selection).ok_or(
                        FragmentError::DoesNotFit {
                            range: selection,
                            container,
                        },
                    )?;
                    let replaced: Vec<FragmentId> =
                        only.children.iter().map(|m| m.word.id.clone()).collect();
                    let index = only.index;
                    return Ok(Some(self.nest_word(index, local, word.clone(), &replaced, ids)));
                }
            }
        }

        let mut data = data;
        if let FragmentData::Sentence(sentence) = &mut data {
            check_words_fit(&sentence.words, selection.len())?;
            for m in &matches {
                match &m.fragment.data {
                    FragmentData::Word(word) if m.intersect == IntersectType::Inside => {
                        let local = normalize_range(selection, m.fragment.range).ok_or(
                            FragmentError::DoesNotFit {
                                range: m.fragment.range,
                                container: selection,
                            },
                        )?;
                        sentence.words.push(WordFragment {
                            id: m.fragment.id.clone(),
                            range: local,
                            data: word.clone(),
                        });
                    }
                    FragmentData::Sentence(old) => {
                        for word in &old.words {
                            let local = word
                                .range
                                .shift(m.fragment.range.start)
                                .and_then(|global| normalize_range(selection, global));
                            if let Some(local) = local {
                                sentence.words.push(WordFragment {
                                    range: local,
                                    ..word.clone()
                                });
                            }
                        }
                    }
                    _ => {}
                }
            }
            sentence.words.sort_by_key(|w| w.range.start);
        }

        let replaced: Vec<usize> = matches.iter().map(|m| m.index).collect();
        for index in replaced.into_iter().rev() {
            self.fragments.remove(index);
        }

        let id = ids.generate();
        tracing::debug!(
            target: "lingua::mutate",
            fragmentable = %self.id,
            fragment = %id,
            ty = %data.fragment_type(),
            range = %selection,
            "wrapped selection"
        );
        self.fragments.push(Fragment {
            id: id.clone(),
            range: selection,
            data,
        });
        self.drop_dangling_highlight();
        Ok(Some(id))
    }

    /// Remove every fragment of type `ty` touching `selection`, at top level
    /// and one level inside sentences.
    ///
    /// Removed fragments are returned with ranges in this Fragmentable's frame.
    /// Unwrapping a Sentence moves its words up to the top level, so the
    /// returned sentence carries no words.
    pub fn unwrap_selection(&mut self, selection: Option<Range>, ty: FragmentType) -> Vec<Fragment> {
        let Some(selection) = selection.map(Range::ordered) else {
            return Vec::new();
        };

        let mut top_level = Vec::new();
        let mut nested: Vec<(usize, Vec<FragmentId>)> = Vec::new();
        for m in intersecting(selection, &self.fragments) {
            if m.fragment.fragment_type() == ty {
                top_level.push(m.index);
            } else if ty == FragmentType::Word && !m.children.is_empty() {
                nested.push((m.index, m.children.iter().map(|c| c.word.id.clone()).collect()));
            }
        }

        let mut unwrapped = Vec::new();

        for (index, word_ids) in nested {
            let parent = &mut self.fragments[index];
            let offset = parent.range.start;
            if let Some(sentence) = parent.as_sentence_mut() {
                let (gone, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut sentence.words)
                    .into_iter()
                    .partition(|w| word_ids.contains(&w.id));
                sentence.words = kept;
                unwrapped.extend(gone.into_iter().map(|w| lift_word(w, offset)));
            }
        }

        let mut promoted = Vec::new();
        for index in top_level.into_iter().rev() {
            let mut removed = self.fragments.remove(index);
            let offset = removed.range.start;
            if let Some(sentence) = removed.as_sentence_mut() {
                promoted.extend(
                    std::mem::take(&mut sentence.words)
                        .into_iter()
                        .map(|w| lift_word(w, offset)),
                );
            }
            unwrapped.push(removed);
        }
        promoted.sort_by_key(|f| f.range.start);
        self.fragments.extend(promoted);

        self.drop_dangling_highlight();
        if !unwrapped.is_empty() {
            tracing::debug!(
                target: "lingua::mutate",
                fragmentable = %self.id,
                %ty,
                count = unwrapped.len(),
                "unwrapped selection"
            );
        }
        unwrapped.sort_by_key(|f| f.range.start);
        unwrapped
    }

    /// Attach an already-built fragment.
    ///
    /// A Word that lands inside a Sentence is nested into it. A Word that
    /// straddles a Sentence boundary does not fit anywhere and is rejected.
    pub fn add_fragment(&mut self, fragment: Fragment) -> Result<FragmentId> {
        self.check_bounds(fragment.range)?;
        if self.contains_id(&fragment.id) {
            return Err(FragmentError::DuplicateId(fragment.id));
        }
        if let FragmentData::Sentence(sentence) = &fragment.data {
            check_words_fit(&sentence.words, fragment.range.len())?;
            if let Some(word) = sentence.words.iter().find(|w| self.contains_id(&w.id)) {
                return Err(FragmentError::DuplicateId(word.id.clone()));
            }
        }

        if let FragmentData::Word(word) = &fragment.data {
            let enclosing = self.fragments.iter().position(|f| {
                f.fragment_type() == FragmentType::Sentence
                    && (f.range.intersects(&fragment.range) || f.range.contains(&fragment.range))
            });
            if let Some(index) = enclosing {
                let container = self.fragments[index].range;
                let local = normalize_range(container, fragment.range).ok_or(
                    FragmentError::DoesNotFit {
                        range: fragment.range,
                        container,
                    },
                )?;
                if let Some(sentence) = self.fragments[index].as_sentence_mut() {
                    sentence.words.push(WordFragment {
                        id: fragment.id.clone(),
                        range: local,
                        data: word.clone(),
                    });
                    tracing::debug!(
                        target: "lingua::mutate",
                        fragmentable = %self.id,
                        fragment = %fragment.id,
                        "nested word into sentence"
                    );
                    return Ok(fragment.id);
                }
            }
        }

        let id = fragment.id.clone();
        self.fragments.push(fragment);
        tracing::debug!(target: "lingua::mutate", fragmentable = %self.id, fragment = %id, "added fragment");
        Ok(id)
    }

    /// Remove a fragment by id. Nested words come back with their range in
    /// this Fragmentable's frame. Removing an unknown id is a no-op.
    pub fn remove_fragment(&mut self, id: &str) -> Option<Fragment> {
        let removed = match self.locate(id)? {
            FragmentLocation::TopLevel(index) => self.fragments.remove(index),
            FragmentLocation::Nested { sentence, word } => {
                let parent = &mut self.fragments[sentence];
                let offset = parent.range.start;
                let words = &mut parent.as_sentence_mut()?.words;
                lift_word(words.remove(word), offset)
            }
        };
        self.drop_dangling_highlight();
        tracing::debug!(target: "lingua::mutate", fragmentable = %self.id, fragment = %id, "removed fragment");
        Some(removed)
    }

    /// Replace a fragment's payload, returning the previous one.
    ///
    /// The variant cannot change. Returns `Ok(None)` for unknown ids.
    pub fn update_fragment(&mut self, id: &str, data: FragmentData) -> Result<Option<FragmentData>> {
        let Some(location) = self.locate(id) else {
            return Ok(None);
        };
        let previous = match location {
            FragmentLocation::TopLevel(index) => {
                let fragment = &mut self.fragments[index];
                let expected = fragment.fragment_type();
                if data.fragment_type() != expected {
                    return Err(FragmentError::VariantMismatch {
                        expected,
                        found: data.fragment_type(),
                    });
                }
                if let FragmentData::Sentence(sentence) = &data {
                    check_words_fit(&sentence.words, fragment.range.len())?;
                }
                std::mem::replace(&mut fragment.data, data)
            }
            FragmentLocation::Nested { sentence, word } => {
                let found = data.fragment_type();
                let FragmentData::Word(new) = data else {
                    return Err(FragmentError::VariantMismatch {
                        expected: FragmentType::Word,
                        found,
                    });
                };
                let Some(parent) = self.fragments[sentence].as_sentence_mut() else {
                    return Ok(None);
                };
                FragmentData::Word(std::mem::replace(&mut parent.words[word].data, new))
            }
        };
        tracing::debug!(target: "lingua::mutate", fragmentable = %self.id, fragment = %id, "updated fragment");
        Ok(Some(previous))
    }

    /// Attach, replace or (with an empty string) detach a sentence translation.
    ///
    /// Returns the previous translation, or `None` if `id` is not a sentence.
    pub fn set_translation(&mut self, id: &str, translation: impl Into<String>) -> Option<String> {
        let Some(FragmentLocation::TopLevel(index)) = self.locate(id) else {
            return None;
        };
        let sentence = self.fragments[index].as_sentence_mut()?;
        Some(std::mem::replace(&mut sentence.translation, translation.into()))
    }

    fn check_bounds(&self, range: Range) -> Result<()> {
        let len = self.len();
        if range.start > range.end || range.end > len {
            return Err(FragmentError::OutOfBounds { range, len });
        }
        if Utf16Index::new(&self.root).slice(range).is_none() {
            return Err(FragmentError::SplitsCharacter { range });
        }
        Ok(())
    }

    fn nest_word(
        &mut self,
        index: usize,
        local: Range,
        data: WordData,
        replaced: &[FragmentId],
        ids: &mut impl IdGenerator,
    ) -> FragmentId {
        let id = ids.generate();
        let sentence_id = self.fragments[index].id.clone();
        if let Some(sentence) = self.fragments[index].as_sentence_mut() {
            sentence.words.retain(|w| !replaced.contains(&w.id));
            sentence.words.push(WordFragment {
                id: id.clone(),
                range: local,
                data,
            });
        }
        self.drop_dangling_highlight();
        tracing::debug!(
            target: "lingua::mutate",
            fragmentable = %self.id,
            sentence = %sentence_id,
            fragment = %id,
            range = %local,
            "wrapped word inside sentence"
        );
        id
    }

    /// The render override must point at a fragment that still exists.
    fn drop_dangling_highlight(&mut self) {
        let dangling = self
            .highlighted_fragment
            .as_deref()
            .is_some_and(|id| !self.contains_id(id));
        if dangling {
            self.highlighted_fragment = None;
        }
    }
}

/// Sentence-local words must lie within `[0, len)` of their sentence.
fn check_words_fit(words: &[WordFragment], len: usize) -> Result<()> {
    let container = Range::new(0, len);
    match words
        .iter()
        .find(|w| w.range.start > w.range.end || !container.contains(&w.range))
    {
        Some(word) => Err(FragmentError::DoesNotFit {
            range: word.range,
            container,
        }),
        None => Ok(()),
    }
}

fn lift_word(word: WordFragment, offset: usize) -> Fragment {
    Fragment {
        id: word.id,
        range: word.range.saturating_shift(offset),
        data: FragmentData::Word(word.data),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fragment::{HighlightData, MarkData, SentenceData};
    use crate::ids::SequentialIds;

    fn mark(id: &str, range: Range) -> Fragment {
        Fragment::new(id, range, FragmentData::Mark(MarkData::default()))
    }

    fn text(len: usize) -> String {
        "abcdefghij".repeat(len / 10 + 1)[..len].to_string()
    }

    #[test]
    fn test_wrap_without_selection_is_noop() {
        let mut f = Fragmentable::new("f", "hello");
        let mut ids = SequentialIds::default();
        assert_eq!(f.wrap_selection(None, FragmentData::word("d"), &mut ids).unwrap(), None);
        assert_eq!(
            f.wrap_selection(Some(Range::caret(2)), FragmentData::word("d"), &mut ids)
                .unwrap(),
            None
        );
        assert!(f.fragments.is_empty());
    }

    #[test]
    fn test_wrap_out_of_bounds_is_rejected() {
        let mut f = Fragmentable::new("f", "hello");
        let err = f
            .wrap_selection(Some(Range::new(2, 9)), FragmentData::word("d"), &mut SequentialIds::default())
            .unwrap_err();
        assert!(matches!(err, FragmentError::OutOfBounds { len: 5, .. }));
        assert!(f.fragments.is_empty());
    }

    #[test]
    fn test_bounds_inside_surrogate_pair_are_rejected() {
        // "𝄞" is two UTF-16 units at [1, 3).
        let mut f = Fragmentable::new("p", "a𝄞b cd");
        let err = f
            .wrap_selection(Some(Range::new(2, 4)), FragmentData::word("x"), &mut SequentialIds::default())
            .unwrap_err();
        assert!(matches!(err, FragmentError::SplitsCharacter { .. }));
        assert!(f.fragments.is_empty());

        let err = f.add_fragment(mark("m", Range::new(0, 2))).unwrap_err();
        assert!(matches!(err, FragmentError::SplitsCharacter { .. }));

        let id = f
            .wrap_selection(Some(Range::new(1, 4)), FragmentData::word("x"), &mut SequentialIds::default())
            .unwrap();
        assert!(id.is_some());
        assert_eq!(f.fragments[0].range, Range::new(1, 4));
    }

    #[test]
    fn test_overflowing_nested_word_does_not_panic() {
        let huge = usize::MAX - 1;
        let mut f = Fragmentable::new("p", text(10)).with_fragments(vec![Fragment::new(
            "s1",
            Range::new(huge, huge),
            FragmentData::Sentence(SentenceData {
                translation: String::new(),
                words: vec![WordFragment::new("w", Range::new(0, 5), "d")],
            }),
        )]);
        assert_eq!(f.find("w").unwrap().global_range(), None);

        let lifted = f.remove_fragment("w").unwrap();
        assert_eq!(lifted.range, Range::caret(usize::MAX));
    }

    #[test]
    fn test_wrap_replaces_covered_marks() {
        let mut f = Fragmentable::new("f", text(30)).with_fragments(vec![
            mark("m1", Range::new(2, 5)),
            mark("m2", Range::new(8, 12)),
            mark("m3", Range::new(20, 25)),
        ]);
        let mut ids = SequentialIds::new("h");
        let id = f
            .wrap_selection(
                Some(Range::new(0, 15)),
                FragmentData::Highlight(HighlightData::default()),
                &mut ids,
            )
            .unwrap()
            .unwrap();

        assert_eq!(id, "h1");
        let covering: Vec<_> = f
            .fragments
            .iter()
            .filter(|frag| frag.range.intersects(&Range::new(0, 15)))
            .collect();
        assert_eq!(covering.len(), 1);
        assert_eq!(covering[0].id, "h1");
        assert_eq!(covering[0].fragment_type(), FragmentType::Highlight);
        assert!(f.contains_id("m3"));
    }

    #[test]
    fn test_wrap_replaces_partial_overlap() {
        let mut f = Fragmentable::new("f", text(20)).with_fragments(vec![mark("m1", Range::new(5, 12))]);
        f.wrap_selection(Some(Range::new(10, 15)), FragmentData::word("d"), &mut SequentialIds::default())
            .unwrap();
        assert!(!f.contains_id("m1"));
        assert_eq!(f.fragments.len(), 1);
    }

    #[test]
    fn test_sentence_keeps_words_it_covers() {
        let mut f = Fragmentable::new("f", text(50)).with_fragments(vec![
            Fragment::new("s-old", Range::new(10, 40), FragmentData::sentence("")),
            Fragment::new("w1", Range::new(15, 20), FragmentData::word("dict-1")),
        ]);
        let id = f
            .wrap_selection(
                Some(Range::new(10, 40)),
                FragmentData::sentence("translated"),
                &mut SequentialIds::new("s"),
            )
            .unwrap()
            .unwrap();

        assert_eq!(f.fragments.len(), 1);
        let sentence = f.fragments[0].as_sentence().unwrap();
        assert_eq!(f.fragments[0].id, id);
        assert_eq!(sentence.translation, "translated");
        assert_eq!(sentence.words.len(), 1);
        assert_eq!(sentence.words[0].id, "w1");
        assert_eq!(sentence.words[0].range, Range::new(5, 10));
    }

    #[test]
    fn test_sentence_carries_words_of_replaced_sentence() {
        let mut f = Fragmentable::new("f", text(50)).with_fragments(vec![Fragment::new(
            "s-old",
            Range::new(10, 30),
            FragmentData::Sentence(SentenceData {
                translation: String::new(),
                words: vec![
                    WordFragment::new("w1", Range::new(0, 4), "a"),
                    WordFragment::new("w2", Range::new(12, 16), "b"),
                ],
            }),
        )]);
        f.wrap_selection(Some(Range::new(20, 45)), FragmentData::sentence(""), &mut SequentialIds::default())
            .unwrap();

        let sentence = f.fragments[0].as_sentence().unwrap();
        // w2 at global [22, 26) survives as local [2, 6); w1 was outside the selection.
        assert_eq!(sentence.words.len(), 1);
        assert_eq!(sentence.words[0].id, "w2");
        assert_eq!(sentence.words[0].range, Range::new(2, 6));
    }

    #[test]
    fn test_sentence_drops_partially_covered_word() {
        let mut f = Fragmentable::new("f", text(30))
            .with_fragments(vec![Fragment::new("w1", Range::new(3, 8), FragmentData::word("d"))]);
        f.wrap_selection(Some(Range::new(5, 20)), FragmentData::sentence(""), &mut SequentialIds::default())
            .unwrap();
        assert!(!f.contains_id("w1"));
        assert!(f.fragments[0].as_sentence().unwrap().words.is_empty());
    }

    #[test]
    fn test_word_nests_inside_single_sentence() {
        let mut f = Fragmentable::new("f", text(50)).with_fragments(vec![Fragment::new(
            "s1",
            Range::new(10, 40),
            FragmentData::sentence("tr"),
        )]);
        let id = f
            .wrap_selection(Some(Range::new(12, 18)), FragmentData::word("dict"), &mut SequentialIds::new("w"))
            .unwrap()
            .unwrap();

        assert_eq!(f.fragments.len(), 1);
        let sentence = f.fragments[0].as_sentence().unwrap();
        assert_eq!(sentence.translation, "tr");
        assert_eq!(sentence.words[0].id, id);
        assert_eq!(sentence.words[0].range, Range::new(2, 8));

        // A second word over the first replaces it inside the sentence.
        f.wrap_selection(Some(Range::new(14, 20)), FragmentData::word("other"), &mut SequentialIds::new("x"))
            .unwrap();
        let sentence = f.fragments[0].as_sentence().unwrap();
        assert_eq!(sentence.words.len(), 1);
        assert_eq!(sentence.words[0].id, "x1");
    }

    #[test]
    fn test_word_straddling_sentence_is_rejected() {
        let mut f = Fragmentable::new("f", text(50)).with_fragments(vec![Fragment::new(
            "s1",
            Range::new(10, 40),
            FragmentData::sentence("tr"),
        )]);
        let before = f.clone();
        let err = f
            .wrap_selection(Some(Range::new(35, 45)), FragmentData::word("d"), &mut SequentialIds::default())
            .unwrap_err();
        assert!(matches!(err, FragmentError::DoesNotFit { .. }));
        assert_eq!(f, before);
    }

    #[test]
    fn test_unwrap_words_top_level_and_nested() {
        let mut f = Fragmentable::new("f", text(60)).with_fragments(vec![
            Fragment::new("w1", Range::new(0, 5), FragmentData::word("a")),
            Fragment::new(
                "s1",
                Range::new(10, 40),
                FragmentData::Sentence(SentenceData {
                    translation: String::new(),
                    words: vec![
                        WordFragment::new("w2", Range::new(2, 6), "b"),
                        WordFragment::new("w3", Range::new(20, 25), "c"),
                    ],
                }),
            ),
            mark("m1", Range::new(45, 50)),
        ]);

        let freed = f.unwrap_selection(Some(Range::new(0, 20)), FragmentType::Word);
        let ids: Vec<_> = freed.iter().map(|frag| frag.id.as_str()).collect();
        assert_eq!(ids, ["w1", "w2"]);
        assert_eq!(freed[1].range, Range::new(12, 16));

        assert!(!f.contains_id("w1"));
        assert!(!f.contains_id("w2"));
        assert!(f.contains_id("w3"));
        assert!(f.contains_id("s1"));
        assert!(f.contains_id("m1"));
    }

    #[test]
    fn test_unwrap_sentence_promotes_words() {
        let mut f = Fragmentable::new("f", text(60)).with_fragments(vec![Fragment::new(
            "s1",
            Range::new(10, 40),
            FragmentData::Sentence(SentenceData {
                translation: "t".into(),
                words: vec![WordFragment::new("w2", Range::new(2, 6), "b")],
            }),
        )]);

        let freed = f.unwrap_selection(Some(Range::caret(20)), FragmentType::Sentence);
        assert_eq!(freed.len(), 1);
        assert!(freed[0].as_sentence().unwrap().words.is_empty());
        assert_eq!(f.fragments.len(), 1);
        assert_eq!(f.fragments[0].id, "w2");
        assert_eq!(f.fragments[0].range, Range::new(12, 16));
    }

    #[test]
    fn test_unwrap_without_selection() {
        let mut f = Fragmentable::new("f", "abc").with_fragments(vec![mark("m1", Range::new(0, 3))]);
        assert!(f.unwrap_selection(None, FragmentType::Mark).is_empty());
        assert_eq!(f.fragments.len(), 1);
    }

    #[test]
    fn test_add_nests_word_into_sentence() {
        let mut f = Fragmentable::new("f", text(50)).with_fragments(vec![Fragment::new(
            "s1",
            Range::new(10, 40),
            FragmentData::sentence(""),
        )]);
        f.add_fragment(Fragment::new("w1", Range::new(20, 24), FragmentData::word("d")))
            .unwrap();
        assert_eq!(f.fragments.len(), 1);
        assert_eq!(f.fragments[0].as_sentence().unwrap().words[0].range, Range::new(10, 14));

        let err = f
            .add_fragment(Fragment::new("w2", Range::new(5, 12), FragmentData::word("d")))
            .unwrap_err();
        assert!(matches!(err, FragmentError::DoesNotFit { .. }));

        f.add_fragment(Fragment::new("w3", Range::new(42, 45), FragmentData::word("d")))
            .unwrap();
        assert_eq!(f.fragments.len(), 2);
    }

    #[test]
    fn test_add_rejects_duplicates_and_out_of_bounds() {
        let mut f = Fragmentable::new("f", "abcdef").with_fragments(vec![mark("m1", Range::new(0, 2))]);
        assert!(matches!(
            f.add_fragment(mark("m1", Range::new(3, 4))),
            Err(FragmentError::DuplicateId(_))
        ));
        assert!(matches!(
            f.add_fragment(mark("m2", Range::new(3, 7))),
            Err(FragmentError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut f = Fragmentable::new("f", "abcdef").with_fragments(vec![
            mark("m1", Range::new(0, 2)),
            mark("m2", Range::new(3, 5)),
        ]);
        f.set_highlight("m1");
        let removed = f.remove_fragment("m1").unwrap();
        assert_eq!(removed.id, "m1");
        assert!(f.highlighted_fragment.is_none());
        let after_first = f.clone();
        assert!(f.remove_fragment("m1").is_none());
        assert_eq!(f, after_first);
    }

    #[test]
    fn test_remove_nested_word_lifts_range() {
        let mut f = Fragmentable::new("f", text(30)).with_fragments(vec![Fragment::new(
            "s1",
            Range::new(10, 20),
            FragmentData::Sentence(SentenceData {
                translation: String::new(),
                words: vec![WordFragment::new("w1", Range::new(1, 3), "d")],
            }),
        )]);
        let removed = f.remove_fragment("w1").unwrap();
        assert_eq!(removed.range, Range::new(11, 13));
        assert!(f.fragments[0].as_sentence().unwrap().words.is_empty());
    }

    #[test]
    fn test_update_fragment() {
        let mut f = Fragmentable::new("f", text(30)).with_fragments(vec![
            Fragment::new("s1", Range::new(0, 10), FragmentData::sentence("old")),
            mark("m1", Range::new(12, 14)),
        ]);

        let previous = f
            .update_fragment(
                "m1",
                FragmentData::Mark(MarkData {
                    comment: Some("check".into()),
                    color: None,
                }),
            )
            .unwrap();
        assert_eq!(previous, Some(FragmentData::Mark(MarkData::default())));

        assert!(matches!(
            f.update_fragment("m1", FragmentData::word("d")),
            Err(FragmentError::VariantMismatch {
                expected: FragmentType::Mark,
                found: FragmentType::Word
            })
        ));
        assert_eq!(
            f.update_fragment("m1", FragmentData::word("d"))
                .unwrap_err()
                .to_string(),
            "cannot replace Mark data with Word data"
        );
        assert_eq!(f.update_fragment("missing", FragmentData::Background).unwrap(), None);

        assert_eq!(f.set_translation("s1", "new"), Some("old".to_string()));
        assert_eq!(f.fragments[0].as_sentence().unwrap().translation, "new");
        assert_eq!(f.set_translation("m1", "x"), None);
    }

    #[test]
    fn test_update_sentence_words_must_fit() {
        let mut f = Fragmentable::new("f", text(30))
            .with_fragments(vec![Fragment::new("s1", Range::new(0, 10), FragmentData::sentence(""))]);
        let err = f
            .update_fragment(
                "s1",
                FragmentData::Sentence(SentenceData {
                    translation: String::new(),
                    words: vec![WordFragment::new("w", Range::new(8, 12), "d")],
                }),
            )
            .unwrap_err();
        assert!(matches!(err, FragmentError::DoesNotFit { .. }));
    }
}
