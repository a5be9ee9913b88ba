//! Half-open offset ranges and editor selections.
//!
//! All offsets are UTF-16 code units of whichever root currently owns the
//! range: the Fragmentable's text for top-level fragments, the sentence
//! substring for words nested inside a sentence.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A half-open `[start, end)` range of UTF-16 code units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Range {
    pub start: usize,
    pub end: usize,
}

impl Range {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn caret(offset: usize) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Whether `other` lies entirely within `self`.
    pub fn contains(&self, other: &Range) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Whether the two ranges share at least one position.
    ///
    /// A caret counts as intersecting a range when it sits strictly inside it.
    pub fn intersects(&self, other: &Range) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Move the range forward by `offset`, e.g. from a sentence-local frame
    /// into its parent's frame. `None` if either bound overflows.
    pub fn shift(self, offset: usize) -> Option<Self> {
        Some(Self {
            start: self.start.checked_add(offset)?,
            end: self.end.checked_add(offset)?,
        })
    }

    /// Like [`Range::shift`], but bounds stop at `usize::MAX`.
    pub fn saturating_shift(self, offset: usize) -> Self {
        Self {
            start: self.start.saturating_add(offset),
            end: self.end.saturating_add(offset),
        }
    }

    /// Swap start and end if needed so that `start <= end`.
    pub fn ordered(self) -> Self {
        if self.start <= self.end {
            self
        } else {
            Self {
                start: self.end,
                end: self.start,
            }
        }
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

impl From<std::ops::Range<usize>> for Range {
    fn from(r: std::ops::Range<usize>) -> Self {
        Self::new(r.start, r.end)
    }
}

impl From<Range> for std::ops::Range<usize> {
    fn from(r: Range) -> Self {
        r.start..r.end
    }
}

/// Text selection as reported by the editor surface.
///
/// The anchor is where the selection started, the head is where the cursor is now.
/// They may be in any order - use `to_range()` for ordered bounds.
#[derive(Clone, Debug, Copy, PartialEq, Eq)]
pub struct Selection {
    pub anchor: usize,
    pub head: usize,
}

impl Selection {
    pub fn new(anchor: usize, head: usize) -> Self {
        Self { anchor, head }
    }

    pub fn collapsed(offset: usize) -> Self {
        Self {
            anchor: offset,
            head: offset,
        }
    }

    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.head
    }

    pub fn is_backwards(&self) -> bool {
        self.head < self.anchor
    }

    pub fn to_range(&self) -> Range {
        Range::new(self.anchor, self.head).ordered()
    }
}

impl From<Selection> for Range {
    fn from(sel: Selection) -> Self {
        sel.to_range()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_is_inclusive_of_bounds() {
        let outer = Range::new(10, 40);
        assert!(outer.contains(&Range::new(10, 40)));
        assert!(outer.contains(&Range::new(15, 20)));
        assert!(outer.contains(&Range::caret(40)));
        assert!(!outer.contains(&Range::new(5, 20)));
        assert!(!outer.contains(&Range::new(35, 41)));
    }

    #[test]
    fn test_intersects() {
        let r = Range::new(5, 10);
        assert!(r.intersects(&Range::new(0, 6)));
        assert!(r.intersects(&Range::new(9, 20)));
        assert!(!r.intersects(&Range::new(0, 5))); // end is exclusive
        assert!(!r.intersects(&Range::new(10, 12)));
        assert!(r.intersects(&Range::caret(7)));
        assert!(!r.intersects(&Range::caret(5)));
    }

    #[test]
    fn test_backwards_selection_orders() {
        let sel = Selection::new(12, 4);
        assert!(sel.is_backwards());
        assert_eq!(sel.to_range(), Range::new(4, 12));
        assert!(Selection::collapsed(3).is_collapsed());
    }

    #[test]
    fn test_shift_overflow() {
        assert_eq!(Range::new(1, 3).shift(4), Some(Range::new(5, 7)));
        assert_eq!(Range::new(0, 2).shift(usize::MAX), None);
        assert_eq!(
            Range::new(0, 2).saturating_shift(usize::MAX),
            Range::caret(usize::MAX)
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Range::new(3, 9).to_string(), "[3, 9)");
    }
}
