//! UTF-16 offset handling for fragment roots.
//!
//! Fragment ranges are stored in UTF-16 code units because that is what the
//! browser editor reports. Rust strings are UTF-8, so every slice goes through
//! a `Utf16Index` built once per root.

use crate::range::Range;

/// Length of `s` in UTF-16 code units.
pub fn utf16_len(s: &str) -> usize {
    s.chars().map(char::len_utf16).sum()
}

/// Maps UTF-16 code unit offsets to byte offsets of one string.
#[derive(Debug, Clone)]
pub struct Utf16Index<'a> {
    text: &'a str,
    /// `(utf16_offset, byte_offset)` at every char boundary, including the end.
    boundaries: Vec<(usize, usize)>,
}

impl<'a> Utf16Index<'a> {
    pub fn new(text: &'a str) -> Self {
        let mut boundaries = Vec::with_capacity(text.len() + 1);
        let mut utf16 = 0;
        for (byte, ch) in text.char_indices() {
            boundaries.push((utf16, byte));
            utf16 += ch.len_utf16();
        }
        boundaries.push((utf16, text.len()));
        Self { text, boundaries }
    }

    pub fn text(&self) -> &'a str {
        self.text
    }

    /// Total length in UTF-16 code units.
    pub fn len(&self) -> usize {
        self.boundaries.last().map(|(u, _)| *u).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Byte offset for a UTF-16 offset, or `None` if it is past the end or
    /// falls between the two halves of a surrogate pair.
    pub fn byte_offset(&self, utf16_offset: usize) -> Option<usize> {
        self.boundaries
            .binary_search_by_key(&utf16_offset, |(u, _)| *u)
            .ok()
            .map(|idx| self.boundaries[idx].1)
    }

    /// Slice the text by a UTF-16 range.
    pub fn slice(&self, range: Range) -> Option<&'a str> {
        if range.start > range.end {
            return None;
        }
        let start = self.byte_offset(range.start)?;
        let end = self.byte_offset(range.end)?;
        self.text.get(start..end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_offsets_match_bytes() {
        let idx = Utf16Index::new("The cat sat");
        assert_eq!(idx.len(), 11);
        assert_eq!(idx.slice(Range::new(4, 7)), Some("cat"));
        assert_eq!(idx.slice(Range::new(11, 11)), Some(""));
        assert_eq!(idx.slice(Range::new(4, 12)), None);
    }

    #[test]
    fn test_multibyte_and_surrogates() {
        // "é" is one UTF-16 unit (two bytes), "𝄞" is a surrogate pair (four bytes).
        let text = "é𝄞x";
        let idx = Utf16Index::new(text);
        assert_eq!(idx.len(), 4);
        assert_eq!(utf16_len(text), 4);
        assert_eq!(idx.slice(Range::new(0, 1)), Some("é"));
        assert_eq!(idx.slice(Range::new(1, 3)), Some("𝄞"));
        assert_eq!(idx.slice(Range::new(3, 4)), Some("x"));
        // Splitting the pair is not sliceable.
        assert_eq!(idx.slice(Range::new(2, 4)), None);
    }

    #[test]
    fn test_inverted_range() {
        let idx = Utf16Index::new("abc");
        assert_eq!(idx.slice(Range::new(2, 1)), None);
    }

    #[test]
    fn test_empty_text() {
        let idx = Utf16Index::new("");
        assert!(idx.is_empty());
        assert_eq!(idx.slice(Range::caret(0)), Some(""));
    }
}
