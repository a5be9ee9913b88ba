//! Range queries over fragment collections.
//!
//! Classifies how each fragment relates to a query range and remaps ranges
//! between coordinate frames (Fragmentable root vs sentence-local).

use crate::fragment::{Fragment, FragmentData, WordFragment};
use crate::range::Range;

/// How a fragment's range relates to a query range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntersectType {
    Disjoint,
    /// Partial intersection.
    Overlap,
    /// The fragment lies entirely within the query.
    Inside,
}

impl IntersectType {
    /// Classify `target` against `query`.
    pub fn classify(query: &Range, target: &Range) -> Self {
        if query.contains(target) {
            IntersectType::Inside
        } else if query.intersects(target) {
            IntersectType::Overlap
        } else {
            IntersectType::Disjoint
        }
    }

    pub fn is_disjoint(&self) -> bool {
        matches!(self, IntersectType::Disjoint)
    }
}

/// A nested word's relation to the query, in the sentence-local frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordMatch<'a> {
    pub word: &'a WordFragment,
    pub intersect: IntersectType,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FragmentMatch<'a> {
    /// Position of the fragment in the queried collection.
    pub index: usize,
    pub fragment: &'a Fragment,
    pub intersect: IntersectType,
    /// Words of a non-disjoint sentence that are not disjoint from the query.
    pub children: Vec<WordMatch<'a>>,
}

/// Classify every fragment in `fragments` against `query`, in collection order.
pub fn fragments_in_range<'a>(query: Range, fragments: &'a [Fragment]) -> Vec<FragmentMatch<'a>> {
    fragments
        .iter()
        .enumerate()
        .map(|(index, fragment)| {
            let intersect = IntersectType::classify(&query, &fragment.range);
            let children = match (&fragment.data, intersect) {
                (_, IntersectType::Disjoint) => Vec::new(),
                (FragmentData::Sentence(sentence), _) => {
                    let local = clip_into(&fragment.range, query);
                    sentence
                        .words
                        .iter()
                        .map(|word| WordMatch {
                            word,
                            intersect: IntersectType::classify(&local, &word.range),
                        })
                        .filter(|m| !m.intersect.is_disjoint())
                        .collect()
                }
                _ => Vec::new(),
            };
            FragmentMatch {
                index,
                fragment,
                intersect,
                children,
            }
        })
        .collect()
}

/// The non-disjoint matches only.
pub fn intersecting<'a>(query: Range, fragments: &'a [Fragment]) -> Vec<FragmentMatch<'a>> {
    fragments_in_range(query, fragments)
        .into_iter()
        .filter(|m| !m.intersect.is_disjoint())
        .collect()
}

/// Re-express `target` in the frame local to `normalizer`.
///
/// Both ranges must be in the same coordinate frame. Returns `None` when the
/// target does not fit inside the normalizer; callers reject the operation
/// instead of clamping.
pub fn normalize_range(normalizer: Range, target: Range) -> Option<Range> {
    let start = target.start.checked_sub(normalizer.start)?;
    let end = target.end.checked_sub(normalizer.start)?;
    if start > end || end > normalizer.len() {
        return None;
    }
    Some(Range::new(start, end))
}

/// Map `query` into the frame of `container`, clipped to the container bounds.
fn clip_into(container: &Range, query: Range) -> Range {
    let start = query.start.max(container.start).min(container.end);
    let end = query.end.min(container.end).max(start);
    // An inverted container clips to an empty local range.
    Range::new(
        start.saturating_sub(container.start),
        end.saturating_sub(container.start),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fragment::{MarkData, SentenceData};

    fn mark(id: &str, range: Range) -> Fragment {
        Fragment::new(id, range, FragmentData::Mark(MarkData::default()))
    }

    #[test]
    fn test_classify() {
        let q = Range::new(10, 20);
        assert_eq!(IntersectType::classify(&q, &Range::new(12, 15)), IntersectType::Inside);
        assert_eq!(IntersectType::classify(&q, &Range::new(10, 20)), IntersectType::Inside);
        assert_eq!(IntersectType::classify(&q, &Range::new(5, 12)), IntersectType::Overlap);
        assert_eq!(IntersectType::classify(&q, &Range::new(18, 30)), IntersectType::Overlap);
        assert_eq!(IntersectType::classify(&q, &Range::new(0, 30)), IntersectType::Overlap);
        assert_eq!(IntersectType::classify(&q, &Range::new(20, 25)), IntersectType::Disjoint);
        assert_eq!(IntersectType::classify(&q, &Range::new(0, 10)), IntersectType::Disjoint);
    }

    #[test]
    fn test_caret_query_overlaps_enclosing_fragment() {
        let fragments = vec![mark("m1", Range::new(3, 9))];
        let matches = intersecting(Range::caret(5), &fragments);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].intersect, IntersectType::Overlap);
    }

    #[test]
    fn test_sentence_children_use_local_frame() {
        let fragments = vec![Fragment::new(
            "s1",
            Range::new(10, 40),
            FragmentData::Sentence(SentenceData {
                translation: String::new(),
                words: vec![
                    WordFragment::new("w1", Range::new(5, 10), "a"),
                    WordFragment::new("w2", Range::new(20, 25), "b"),
                ],
            }),
        )];

        // Global [12, 22) is local [2, 12): w1 inside, w2 disjoint.
        let matches = fragments_in_range(Range::new(12, 22), &fragments);
        assert_eq!(matches[0].intersect, IntersectType::Overlap);
        assert_eq!(matches[0].children.len(), 1);
        assert_eq!(matches[0].children[0].word.id, "w1");
        assert_eq!(matches[0].children[0].intersect, IntersectType::Inside);

        // Global [32, 50) clips to local [22, 30): w2 overlaps.
        let matches = fragments_in_range(Range::new(32, 50), &fragments);
        assert_eq!(matches[0].children.len(), 1);
        assert_eq!(matches[0].children[0].word.id, "w2");
        assert_eq!(matches[0].children[0].intersect, IntersectType::Overlap);
    }

    #[test]
    fn test_disjoint_fragments_reported() {
        let fragments = vec![mark("m1", Range::new(0, 2)), mark("m2", Range::new(5, 8))];
        let matches = fragments_in_range(Range::new(4, 9), &fragments);
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].intersect, IntersectType::Disjoint);
        assert_eq!(matches[1].intersect, IntersectType::Inside);
        assert_eq!(matches[1].index, 1);
        assert_eq!(intersecting(Range::new(4, 9), &fragments).len(), 1);
    }

    #[test]
    fn test_normalize_range() {
        let sentence = Range::new(10, 40);
        assert_eq!(normalize_range(sentence, Range::new(15, 20)), Some(Range::new(5, 10)));
        assert_eq!(normalize_range(sentence, Range::new(10, 40)), Some(Range::new(0, 30)));
        // Starts before the container.
        assert_eq!(normalize_range(sentence, Range::new(5, 20)), None);
        // Ends past the container.
        assert_eq!(normalize_range(sentence, Range::new(35, 41)), None);
    }
}
