//! Source location tracking

/// A span represents a byte range in the input line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    /// Start byte offset
    pub start: usize,
    /// End byte offset (exclusive)
    pub end: usize,
}

impl Span {
    /// Create a new span
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Span covering the whole of `src`
    pub fn whole(src: &str) -> Self {
        Self { start: 0, end: src.len() }
    }

    /// Borrow the spanned text out of the line it was taken from.
    ///
    /// Falls back to an empty slice if the span does not fit `src`.
    pub fn text<'a>(&self, src: &'a str) -> &'a str {
        src.get(self.start..self.end).unwrap_or("")
    }
}
