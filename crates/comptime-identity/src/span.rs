// crates/comptime-identity/src/span.rs

use std::fmt;

/// Source position of a node or declaration.
///
/// `start` doubles as the declaration position used to disambiguate
/// shadowed variables in dynamic type map keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start: usize, // Byte offset
    pub end: usize,   // Byte offset (exclusive)
    pub line: u32,    // 1-indexed
    pub column: u32,  // 1-indexed
}

impl Span {
    pub fn new(start: usize, end: usize, line: u32, column: u32) -> Self {
        Self {
            start,
            end,
            line,
            column,
        }
    }

    /// A zero-width span at a byte offset, for synthesized nodes.
    pub fn point(offset: usize) -> Self {
        Self {
            start: offset,
            end: offset,
            line: 0,
            column: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Covering span from the start of `self` to the end of `other`.
    pub fn to(self, other: Span) -> Span {
        Span {
            start: self.start,
            end: other.end.max(self.end),
            line: self.line,
            column: self.column,
        }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

impl From<Span> for miette::SourceSpan {
    fn from(span: Span) -> Self {
        // miette uses (offset, length)
        (span.start, span.len()).into()
    }
}

impl From<&Span> for miette::SourceSpan {
    fn from(span: &Span) -> Self {
        (*span).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_covers_both_spans() {
        let a = Span::new(4, 6, 1, 5);
        let b = Span::new(9, 12, 1, 10);
        let merged = a.to(b);
        assert_eq!(merged.start, 4);
        assert_eq!(merged.end, 12);
        assert_eq!(merged.line, 1);
    }

    #[test]
    fn source_span_uses_offset_and_length() {
        let span: miette::SourceSpan = Span::new(10, 15, 2, 3).into();
        assert_eq!(span.offset(), 10);
        assert_eq!(span.len(), 5);
    }

    #[test]
    fn point_is_empty() {
        assert!(Span::point(7).is_empty());
        assert_eq!(Span::new(3, 3, 1, 1).len(), 0);
    }
}
