//! Position and span types for source location tracking.
//!
//! Positions inside the front-end are 1-based byte offsets (`Idx`), with `0`
//! reserved as the "unset" sentinel. Anything leaving the front-end (ESTree
//! output, diagnostics) is translated to 0-based offsets at the boundary.

use std::fmt;
use std::ops::Range;

/// A 1-based byte offset into the source text. `0` means unset.
pub type Idx = u32;

/// Convert a 0-based byte offset into an `Idx`.
#[inline]
pub fn idx_of(offset: usize) -> Idx {
    offset as Idx + 1
}

/// Convert an `Idx` back into a 0-based byte offset. Unset maps to 0.
#[inline]
pub fn offset_of(idx: Idx) -> usize {
    idx.saturating_sub(1) as usize
}

/// A source span from `start` (inclusive) to `end` (exclusive), both 1-based.
#[derive(Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct Span {
    pub start: Idx,
    pub end: Idx,
}

impl Span {
    /// Create a new span.
    #[inline]
    pub fn new(start: Idx, end: Idx) -> Self {
        debug_assert!(end >= start);
        Self { start, end }
    }

    /// The unset span, used only by containers that are allowed to stay empty.
    #[inline]
    pub const fn unset() -> Self {
        Self { start: 0, end: 0 }
    }

    /// Whether neither end of this span has been set.
    #[inline]
    pub fn is_unset(&self) -> bool {
        self.start == 0 && self.end == 0
    }

    /// The length of this span in bytes.
    #[inline]
    pub fn len(&self) -> u32 {
        self.end - self.start
    }

    /// Whether this span is empty (zero-length).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Whether this span contains the given position.
    #[inline]
    pub fn contains(&self, idx: Idx) -> bool {
        idx >= self.start && idx < self.end
    }

    /// Whether `other` lies entirely inside this span.
    #[inline]
    pub fn encloses(&self, other: &Span) -> bool {
        other.start >= self.start && other.end <= self.end
    }

    /// A new span from the start of this one to the end of `other`.
    #[inline]
    pub fn to(&self, other: Span) -> Span {
        Span::new(self.start, other.end.max(self.start))
    }

    /// The 0-based `(start, end)` pair exposed to external formats.
    #[inline]
    pub fn offsets(&self) -> (usize, usize) {
        (offset_of(self.start), offset_of(self.end))
    }

    /// Convert to a 0-based byte range, or `None` when unset.
    #[inline]
    pub fn to_range(&self) -> Option<Range<usize>> {
        if self.is_unset() {
            return None;
        }
        let (start, end) = self.offsets();
        Some(start..end)
    }

    /// The source text covered by this span.
    pub fn slice<'s>(&self, source: &'s str) -> Option<&'s str> {
        self.to_range().and_then(|range| source.get(range))
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

/// Line and column information derived from source text.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct LineAndColumn {
    /// 1-based line number.
    pub line: u32,
    /// 1-based column, counted in bytes.
    pub column: u32,
}

impl LineAndColumn {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

/// A map from byte offsets to line numbers, built from source text.
///
/// Only `\n` starts a new line, so the result agrees with a linear scan of
/// the prefix that bumps the line on `\n` and the column on every other byte.
#[derive(Debug, Clone)]
pub struct LineMap {
    /// 0-based byte offsets of the start of each line.
    line_starts: Vec<usize>,
    len: usize,
}

impl LineMap {
    /// Build a line map from source text.
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![0];
        for (i, byte) in text.bytes().enumerate() {
            if byte == b'\n' {
                line_starts.push(i + 1);
            }
        }
        Self {
            line_starts,
            len: text.len(),
        }
    }

    /// Get the 0-based line index for a 0-based byte offset.
    fn line_index_of(&self, offset: usize) -> usize {
        match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(line) => line - 1,
        }
    }

    /// Get the 1-based line and column for a 0-based byte offset.
    /// Offsets past the end of the text clamp to the end.
    pub fn line_and_column_of(&self, offset: usize) -> LineAndColumn {
        let offset = offset.min(self.len);
        let line = self.line_index_of(offset);
        let column = offset - self.line_starts[line];
        LineAndColumn {
            line: line as u32 + 1,
            column: column as u32 + 1,
        }
    }

    /// Get the 1-based line and column for an `Idx`.
    pub fn line_and_column_of_idx(&self, idx: Idx) -> LineAndColumn {
        self.line_and_column_of(offset_of(idx))
    }

    /// Get the total number of lines.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}

/// Compute the 1-based line and column of a 0-based offset by scanning the prefix.
pub fn line_and_column(text: &str, offset: usize) -> LineAndColumn {
    let mut line = 1;
    let mut column = 1;
    for &byte in text.as_bytes().iter().take(offset) {
        if byte == b'\n' {
            line += 1;
            column = 1;
        } else {
            column += 1;
        }
    }
    LineAndColumn { line, column }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_offsets() {
        let span = Span::new(5, 10);
        assert_eq!(span.len(), 5);
        assert_eq!(span.offsets(), (4, 9));
        assert!(span.contains(5));
        assert!(!span.contains(10));
        assert_eq!(span.slice("abcdefghijkl"), Some("efghi"));
    }

    #[test]
    fn test_unset_span() {
        let span = Span::unset();
        assert!(span.is_unset());
        assert_eq!(span.to_range(), None);
        assert_eq!(span.offsets(), (0, 0));
        assert_eq!(format!("{:?}", span), "0..0");
    }

    #[test]
    fn test_idx_round_trip() {
        assert_eq!(idx_of(0), 1);
        assert_eq!(offset_of(1), 0);
        assert_eq!(offset_of(0), 0);
    }

    #[test]
    fn test_line_map() {
        let text = "line1\nline2\nline3";
        let map = LineMap::new(text);
        assert_eq!(map.line_count(), 3);
        assert_eq!(map.line_and_column_of(0), LineAndColumn::new(1, 1));
        assert_eq!(map.line_and_column_of(5), LineAndColumn::new(1, 6)); // newline char
        assert_eq!(map.line_and_column_of(6), LineAndColumn::new(2, 1));
        assert_eq!(map.line_and_column_of(8), LineAndColumn::new(2, 3));
        assert_eq!(map.line_and_column_of(100), LineAndColumn::new(3, 6));
    }

    #[test]
    fn test_line_map_agrees_with_prefix_scan() {
        let text = "a\r\nbc\n\n  é x";
        let map = LineMap::new(text);
        for offset in 0..=text.len() {
            assert_eq!(map.line_and_column_of(offset), line_and_column(text, offset), "offset {}", offset);
        }
    }
}
