use serde::{Deserialize, Serialize};
use text_size::{TextRange, TextSize};

/// A half-open interval `[start, start + length)` over a file's text.
///
/// This is the shape editors use when asking for classifications of the
/// visible region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TextSpan {
    pub start: u32,
    pub length: u32,
}

impl TextSpan {
    pub fn new(start: u32, length: u32) -> Self {
        Self { start, length }
    }

    /// Span from `start` (inclusive) to `end` (exclusive).
    pub fn from_bounds(start: u32, end: u32) -> Self {
        Self {
            start,
            length: end.saturating_sub(start),
        }
    }

    /// Span covering the whole of `text`.
    pub fn of_text(text: &str) -> Self {
        Self::of_len(text.len())
    }

    /// Span `[0, len)`, saturating at `u32::MAX`.
    pub fn of_len(len: usize) -> Self {
        Self::new(0, u32::try_from(len).unwrap_or(u32::MAX))
    }

    pub fn end(&self) -> u32 {
        self.start.saturating_add(self.length)
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Check whether `[start, start + length]` touches this span.
    ///
    /// Both ends are inclusive, so a zero-width span sitting on a node's
    /// boundary still intersects that node.
    pub fn intersects_with(&self, start: u32, length: u32) -> bool {
        let end = start.saturating_add(length);
        start <= self.end() && end >= self.start
    }

    /// Same test as [`intersects_with`](Self::intersects_with) for a range.
    pub fn intersects_range(&self, range: TextRange) -> bool {
        self.intersects_with(range.start().into(), range.len().into())
    }

    /// Check whether `offset` lies in `[start, end)`.
    pub fn contains(&self, offset: u32) -> bool {
        offset >= self.start && offset < self.end()
    }
}

impl From<TextRange> for TextSpan {
    fn from(range: TextRange) -> Self {
        Self::new(range.start().into(), range.len().into())
    }
}

impl From<TextSpan> for TextRange {
    fn from(span: TextSpan) -> Self {
        TextRange::at(TextSize::from(span.start), TextSize::from(span.length))
    }
}
