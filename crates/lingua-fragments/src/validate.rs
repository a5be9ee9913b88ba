//! Structural checks over stored fragment data.
//!
//! Loading and rendering both tolerate malformed data. `validate` reports
//! what the renderer would silently truncate, so tools can surface it.

use std::collections::HashSet;
use std::fmt;

use crate::fragment::FragmentId;
use crate::fragmentable::Fragmentable;
use crate::range::Range;
use crate::text::Utf16Index;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    /// `start > end`.
    InvertedRange { id: FragmentId, range: Range },
    /// A top-level fragment reaches past the end of the root.
    OutOfBounds { id: FragmentId, range: Range, len: usize },
    /// A bound falls between the two halves of a surrogate pair.
    SplitsCharacter { id: FragmentId, range: Range },
    /// A nested word does not fit inside its sentence's local frame.
    WordOutsideSentence {
        sentence: FragmentId,
        word: FragmentId,
        range: Range,
        sentence_len: usize,
    },
    /// `second` starts before `first` ends, among siblings.
    Overlap { first: FragmentId, second: FragmentId },
    DuplicateId(FragmentId),
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Issue::InvertedRange { id, range } => write!(f, "{id}: range {range} is inverted"),
            Issue::OutOfBounds { id, range, len } => {
                write!(f, "{id}: range {range} is out of bounds for a root of length {len}")
            }
            Issue::SplitsCharacter { id, range } => {
                write!(f, "{id}: range {range} splits a surrogate pair")
            }
            Issue::WordOutsideSentence {
                sentence,
                word,
                range,
                sentence_len,
            } => write!(
                f,
                "{word}: local range {range} does not fit in sentence {sentence} of length {sentence_len}"
            ),
            Issue::Overlap { first, second } => write!(f, "{second} overlaps {first}"),
            Issue::DuplicateId(id) => write!(f, "{id}: id is used more than once"),
        }
    }
}

impl Fragmentable {
    /// Every structural problem in this Fragmentable, in a stable order:
    /// range problems in collection order, then overlaps, then duplicate ids.
    pub fn validate(&self) -> Vec<Issue> {
        let index = Utf16Index::new(&self.root);
        let mut issues = Vec::new();

        for fragment in &self.fragments {
            check_range(&index, &fragment.id, fragment.range, &mut issues);

            let Some(sentence) = fragment.as_sentence() else {
                continue;
            };
            let sentence_len = fragment.range.len();
            let sub = index.slice(fragment.range).map(Utf16Index::new);
            for word in &sentence.words {
                if word.range.start > word.range.end {
                    issues.push(Issue::InvertedRange {
                        id: word.id.clone(),
                        range: word.range,
                    });
                } else if word.range.end > sentence_len {
                    issues.push(Issue::WordOutsideSentence {
                        sentence: fragment.id.clone(),
                        word: word.id.clone(),
                        range: word.range,
                        sentence_len,
                    });
                } else if let Some(sub) = &sub {
                    if sub.slice(word.range).is_none() {
                        issues.push(Issue::SplitsCharacter {
                            id: word.id.clone(),
                            range: word.range,
                        });
                    }
                }
            }
            check_overlaps(sentence.words.iter().map(|w| (&w.id, w.range)), &mut issues);
        }

        check_overlaps(self.fragments.iter().map(|f| (&f.id, f.range)), &mut issues);

        let mut seen = HashSet::new();
        let nested = self
            .fragments
            .iter()
            .filter_map(|f| f.as_sentence())
            .flat_map(|s| s.words.iter().map(|w| &w.id));
        for id in self.fragments.iter().map(|f| &f.id).chain(nested) {
            if !seen.insert(id) {
                issues.push(Issue::DuplicateId(id.clone()));
            }
        }

        issues
    }
}

fn check_range(index: &Utf16Index<'_>, id: &FragmentId, range: Range, issues: &mut Vec<Issue>) {
    if range.start > range.end {
        issues.push(Issue::InvertedRange {
            id: id.clone(),
            range,
        });
    } else if range.end > index.len() {
        issues.push(Issue::OutOfBounds {
            id: id.clone(),
            range,
            len: index.len(),
        });
    } else if index.slice(range).is_none() {
        issues.push(Issue::SplitsCharacter {
            id: id.clone(),
            range,
        });
    }
}

/// Same rule the renderer walks by: sorted by start, a fragment may not begin
/// before the previous one ends.
fn check_overlaps<'a>(
    siblings: impl Iterator<Item = (&'a FragmentId, Range)>,
    issues: &mut Vec<Issue>,
) {
    let mut sorted: Vec<_> = siblings.collect();
    sorted.sort_by_key(|(_, range)| range.start);

    let mut previous: Option<(&FragmentId, Range)> = None;
    for (id, range) in sorted {
        if let Some((prev_id, prev_range)) = previous {
            if range.start < prev_range.end {
                issues.push(Issue::Overlap {
                    first: prev_id.clone(),
                    second: id.clone(),
                });
                // Keep measuring against whichever reaches further.
                if prev_range.end >= range.end {
                    continue;
                }
            }
        }
        previous = Some((id, range));
    }
}
